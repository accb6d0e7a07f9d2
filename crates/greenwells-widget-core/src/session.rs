use tracing::info;

use crate::error::WidgetError;
use crate::persona::GateSpec;
use crate::storage::{FallbackStore, KeyValueStore};

/// In-memory session flag mirrored to the gate's storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGate {
    spec: Option<GateSpec>,
    authenticated: bool,
    error_visible: bool,
}

impl SessionGate {
    pub fn new(spec: Option<GateSpec>) -> Self {
        Self {
            spec,
            authenticated: false,
            error_visible: false,
        }
    }

    /// Only the exact string `"true"` restores a signed-in session.
    pub fn restore<S: KeyValueStore>(&mut self, store: &FallbackStore<S>) {
        let Some(spec) = self.spec else {
            self.authenticated = false;
            return;
        };
        self.authenticated = store.get(spec.storage_key).as_deref() == Some("true");
    }

    pub fn login<S: KeyValueStore>(
        &mut self,
        store: &mut FallbackStore<S>,
        username: &str,
        password: &str,
    ) -> Result<(), WidgetError> {
        let Some(spec) = self.spec else {
            self.error_visible = true;
            return Err(WidgetError::InvalidCredentials);
        };
        if username != spec.username || password != spec.password {
            self.error_visible = true;
            return Err(WidgetError::InvalidCredentials);
        }

        self.authenticated = true;
        self.error_visible = false;
        store.set(spec.storage_key, "true");
        info!(key = spec.storage_key, "session opened");
        Ok(())
    }

    pub fn logout<S: KeyValueStore>(&mut self, store: &mut FallbackStore<S>) {
        self.authenticated = false;
        if let Some(spec) = self.spec {
            store.set(spec.storage_key, "false");
            info!(key = spec.storage_key, "session closed");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{Persona, PersonaDescriptor};
    use crate::storage::{ADMIN_AUTH_STORAGE_KEY, AGENT_AUTH_STORAGE_KEY, MemoryStore};

    fn admin_gate() -> SessionGate {
        SessionGate::new(PersonaDescriptor::for_persona(Persona::Admin).gate)
    }

    #[test]
    fn login_with_exact_pair_sets_and_persists_flag() {
        let mut store = FallbackStore::new(MemoryStore::new());
        let mut gate = admin_gate();

        gate.login(&mut store, "admin", "admin123").expect("valid login");

        assert!(gate.is_authenticated());
        assert!(!gate.error_visible());
        assert_eq!(store.get(ADMIN_AUTH_STORAGE_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn wrong_pairs_never_set_flag_and_always_show_error() {
        let mut store = FallbackStore::new(MemoryStore::new());
        let mut gate = admin_gate();

        for (username, password) in [
            ("admin", "admin1234"),
            ("Admin", "admin123"),
            (" admin", "admin123"),
            ("agent", "agent123"),
            ("", ""),
        ] {
            let error = gate
                .login(&mut store, username, password)
                .expect_err("credentials must be rejected");
            assert_eq!(error, WidgetError::InvalidCredentials);
            assert!(!gate.is_authenticated());
            assert!(gate.error_visible());
        }
        assert_eq!(store.get(ADMIN_AUTH_STORAGE_KEY), None);
    }

    #[test]
    fn successful_login_hides_previous_error() {
        let mut store = FallbackStore::new(MemoryStore::new());
        let mut gate = admin_gate();
        let _ = gate.login(&mut store, "admin", "nope");
        assert!(gate.error_visible());

        gate.login(&mut store, "admin", "admin123").expect("valid login");
        assert!(!gate.error_visible());
    }

    #[test]
    fn logout_clears_and_persists_false() {
        let mut store = FallbackStore::new(MemoryStore::new());
        let mut gate = SessionGate::new(PersonaDescriptor::for_persona(Persona::Agent).gate);
        gate.login(&mut store, "agent", "agent123").expect("valid login");

        gate.logout(&mut store);

        assert!(!gate.is_authenticated());
        assert_eq!(store.get(AGENT_AUTH_STORAGE_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn restore_only_accepts_literal_true() {
        for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("false", false)] {
            let store =
                FallbackStore::new(MemoryStore::with_entries([(ADMIN_AUTH_STORAGE_KEY, raw)]));
            let mut gate = admin_gate();
            gate.restore(&store);
            assert_eq!(gate.is_authenticated(), expected, "stored value {raw}");
        }
    }

    #[test]
    fn gateless_login_is_rejected() {
        let mut store = FallbackStore::new(MemoryStore::new());
        let mut gate = SessionGate::new(None);
        assert!(gate.login(&mut store, "admin", "admin123").is_err());
    }
}
