use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::storage::{ADMIN_AUTH_STORAGE_KEY, AGENT_AUTH_STORAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    User,
    Admin,
    Agent,
}

impl Persona {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Agent => "agent",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" | "" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "agent" => Ok(Self::Agent),
            other => Err(ConfigError::UnknownPersona(other.to_string())),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Rate,
    Escalate,
    ViewDashboard,
}

impl Capability {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rate => "rate",
            Self::Escalate => "escalate",
            Self::ViewDashboard => "view_dashboard",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    pub can_rate: bool,
    pub can_escalate: bool,
    pub can_view_dashboard: bool,
}

impl CapabilitySet {
    #[must_use]
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::Rate => self.can_rate,
            Capability::Escalate => self.can_escalate,
            Capability::ViewDashboard => self.can_view_dashboard,
        }
    }
}

/// Hardcoded credential pair compared in the browser. A UI gate only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSpec {
    pub username: &'static str,
    pub password: &'static str,
    pub storage_key: &'static str,
}

const ADMIN_GATE: GateSpec = GateSpec {
    username: "admin",
    password: "admin123",
    storage_key: ADMIN_AUTH_STORAGE_KEY,
};

const AGENT_GATE: GateSpec = GateSpec {
    username: "agent",
    password: "agent123",
    storage_key: AGENT_AUTH_STORAGE_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaDescriptor {
    pub persona: Persona,
    pub gate: Option<GateSpec>,
    pub dom_prefix: &'static str,
    pub capabilities: CapabilitySet,
}

impl PersonaDescriptor {
    #[must_use]
    pub fn for_persona(persona: Persona) -> Self {
        match persona {
            // The public site hosts the admin tab behind the admin gate.
            Persona::User => Self {
                persona,
                gate: Some(ADMIN_GATE),
                dom_prefix: "user",
                capabilities: CapabilitySet {
                    can_rate: true,
                    can_escalate: true,
                    can_view_dashboard: false,
                },
            },
            Persona::Admin => Self {
                persona,
                gate: Some(ADMIN_GATE),
                dom_prefix: "admin",
                capabilities: CapabilitySet {
                    can_rate: false,
                    can_escalate: false,
                    can_view_dashboard: true,
                },
            },
            Persona::Agent => Self {
                persona,
                gate: Some(AGENT_GATE),
                dom_prefix: "agent",
                capabilities: CapabilitySet {
                    can_rate: false,
                    can_escalate: false,
                    can_view_dashboard: true,
                },
            },
        }
    }

    #[must_use]
    pub fn dashboard_id(&self) -> String {
        format!("{}-dashboard", self.dom_prefix)
    }
}
