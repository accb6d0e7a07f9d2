use tracing::warn;

use crate::error::WidgetError;
use crate::persona::Persona;

const LOGIN_IDS: [&str; 5] = [
    "login-modal",
    "login-form",
    "login-username",
    "login-password",
    "login-error",
];

const FEEDBACK_IDS: [&str; 9] = [
    "feedback-form",
    "name",
    "email",
    "service-type",
    "comments",
    "rating",
    "success-message",
    "ai-summary",
    "summary-text",
];

const CHAT_IDS: [&str; 4] = ["chat-popup", "chat-messages", "chat-input", "send-btn"];

/// Admin overview cards filled from locally computed analytics.
pub const INSIGHT_IDS: [&str; 8] = [
    "metric-total",
    "metric-positive",
    "metric-rating",
    "metric-accuracy",
    "insights-list",
    "recent-feedback",
    "sentiment-breakdown",
    "team-performance",
];

/// Element ids a persona's page must or may provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomContract {
    pub persona: Persona,
    pub required: Vec<&'static str>,
    pub optional: Vec<&'static str>,
}

impl DomContract {
    #[must_use]
    pub fn for_persona(persona: Persona) -> Self {
        let (required, optional): (Vec<&'static str>, Vec<&'static str>) = match persona {
            Persona::User => (
                FEEDBACK_IDS.iter().chain(CHAT_IDS.iter()).copied().collect(),
                LOGIN_IDS
                    .iter()
                    .copied()
                    .chain([
                        "chat-btn",
                        "close-chat",
                        "escalate-btn",
                        "navbar",
                        "logout-btn",
                        "admin-dashboard",
                        "trend-chart",
                        "language-select",
                        "ai-slider",
                        "agent-input",
                        "current-customer",
                        "current-sentiment",
                    ])
                    .chain(INSIGHT_IDS)
                    .collect(),
            ),
            Persona::Admin => (
                LOGIN_IDS.iter().copied().chain(["admin-dashboard"]).collect(),
                ["navbar", "logout-btn", "trend-chart"]
                    .into_iter()
                    .chain(INSIGHT_IDS)
                    .collect(),
            ),
            Persona::Agent => (
                LOGIN_IDS.iter().copied().chain(["agent-dashboard"]).collect(),
                vec![
                    "navbar",
                    "logout-btn",
                    "agent-input",
                    "current-customer",
                    "current-sentiment",
                ],
            ),
        };
        Self {
            persona,
            required,
            optional,
        }
    }

    /// Fails on the first missing required id. Missing optional ids are
    /// logged and returned so the caller can skip their wiring.
    pub fn verify<F>(&self, is_present: F) -> Result<Vec<&'static str>, WidgetError>
    where
        F: Fn(&str) -> bool,
    {
        if let Some(id) = self.required.iter().find(|id| !is_present(**id)) {
            return Err(WidgetError::MissingElement {
                id: (*id).to_string(),
            });
        }
        let missing = self
            .optional
            .iter()
            .copied()
            .filter(|id| !is_present(*id))
            .collect::<Vec<_>>();
        for id in &missing {
            warn!(persona = %self.persona, id, "optional element missing; skipping its wiring");
        }
        Ok(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_id_is_fatal() {
        let contract = DomContract::for_persona(Persona::Agent);
        let error = contract
            .verify(|id| id != "agent-dashboard")
            .expect_err("dashboard is required");
        assert_eq!(
            error,
            WidgetError::MissingElement {
                id: "agent-dashboard".to_string(),
            }
        );
    }

    #[test]
    fn missing_optional_ids_are_reported() {
        let contract = DomContract::for_persona(Persona::Admin);
        let missing = contract
            .verify(|id| id != "trend-chart")
            .expect("optional ids never fail");
        assert_eq!(missing, vec!["trend-chart"]);
    }

    #[test]
    fn user_page_requires_feedback_and_chat() {
        let contract = DomContract::for_persona(Persona::User);
        assert!(contract.required.contains(&"feedback-form"));
        assert!(contract.required.contains(&"chat-messages"));
        assert!(contract.optional.contains(&"login-modal"));
        assert!(contract.verify(|_| true).expect("complete page").is_empty());
    }
}
