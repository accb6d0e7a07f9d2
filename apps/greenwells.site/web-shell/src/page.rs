use greenwells_widget_core::{
    ConfigError, FeedbackDigest, Persona, SentimentBreakdown, Sender, TeamPerformance,
    WidgetConfig, WidgetError,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ShellError {
    #[error("{0} is unavailable")]
    MissingHost(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

/// Persona named by `<body data-persona>`. An absent attribute means the public site.
pub(crate) fn resolve_persona(attribute: Option<&str>) -> Result<Persona, ConfigError> {
    Persona::parse(attribute.unwrap_or_default())
}

/// Defaults with host overrides applied. Malformed overrides are reported and ignored.
pub(crate) fn resolve_config(raw_overrides: Option<&str>) -> (WidgetConfig, Option<ConfigError>) {
    let Some(raw) = raw_overrides else {
        return (WidgetConfig::default(), None);
    };
    match WidgetConfig::default().with_overrides_json(raw) {
        Ok(config) => (config, None),
        Err(error) => (WidgetConfig::default(), Some(error)),
    }
}

/// Star and slider values arrive as attribute or input strings.
pub(crate) fn parse_small_number(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok()
}

pub(crate) fn bubble_class(sender: Sender) -> String {
    format!("chat-bubble {}", sender.as_str())
}

pub(crate) fn star_color(lit: bool) -> &'static str {
    if lit { "#6DD47E" } else { "#ddd" }
}

pub(crate) fn is_submit_key(key: &str) -> bool {
    key == "Enter"
}

/// Session-dependent page elements. `None` leaves the element alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionChrome {
    pub(crate) dashboard: Option<bool>,
    pub(crate) navbar: Option<bool>,
    pub(crate) logout_button: Option<bool>,
}

/// The public site only toggles its logout button; the staff pages show the
/// dashboard (both `active` and not `hidden`) and navbar once signed in.
pub(crate) fn session_chrome(persona: Persona, signed_in: bool) -> SessionChrome {
    match persona {
        Persona::User => SessionChrome {
            dashboard: None,
            navbar: None,
            logout_button: Some(signed_in),
        },
        Persona::Admin | Persona::Agent => SessionChrome {
            dashboard: Some(signed_in),
            navbar: Some(signed_in),
            logout_button: None,
        },
    }
}

pub(crate) fn breakdown_lines(breakdown: SentimentBreakdown) -> Vec<String> {
    vec![
        format!("Positive: {}", breakdown.positive),
        format!("Neutral: {}", breakdown.neutral),
        format!("Negative: {}", breakdown.negative),
    ]
}

pub(crate) fn team_lines(team: &TeamPerformance) -> Vec<String> {
    let mut lines = vec![
        format!("Active agents: {} of {}", team.active_agents, team.total_agents),
        format!("Average response time: {}", team.average_response_time),
        format!("Customer satisfaction: {}", team.customer_satisfaction),
    ];
    lines.extend(team.agents.iter().map(|agent| {
        format!(
            "{}: {} chats, {} satisfaction",
            agent.name, agent.chats_handled, agent.satisfaction
        )
    }));
    lines
}

pub(crate) fn digest_line(entry: &FeedbackDigest) -> String {
    format!(
        "{} ({}/5, {}): {}",
        entry.name,
        entry.rating,
        entry.category.as_str(),
        entry.summary
    )
}

pub(crate) fn sentiment_class(entry: &FeedbackDigest) -> String {
    format!("sentiment-{}", entry.sentiment.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_defaults_to_public_site() {
        assert_eq!(resolve_persona(None).expect("default"), Persona::User);
        assert_eq!(resolve_persona(Some("agent")).expect("agent"), Persona::Agent);
        assert!(resolve_persona(Some("root")).is_err());
    }

    #[test]
    fn malformed_overrides_fall_back_to_defaults() {
        let (config, error) = resolve_config(Some("{\"replyDelayMs\":"));
        assert_eq!(config, WidgetConfig::default());
        assert!(matches!(error, Some(ConfigError::InvalidOverrides(_))));

        let (config, error) = resolve_config(Some("{\"replyDelayMs\":50}"));
        assert_eq!(config.reply_delay_ms, 50);
        assert!(error.is_none());
    }

    #[test]
    fn shell_errors_keep_widget_messages() {
        let error = ShellError::from(WidgetError::MissingElement {
            id: "chat-popup".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "required element '#chat-popup' is missing from the page"
        );
        assert_eq!(
            ShellError::MissingHost("window").to_string(),
            "window is unavailable"
        );
    }

    #[test]
    fn dom_value_helpers() {
        assert_eq!(parse_small_number(" 4 "), Some(4));
        assert_eq!(parse_small_number("four"), None);
        assert_eq!(bubble_class(Sender::Bot), "chat-bubble bot");
        assert_eq!(star_color(true), "#6DD47E");
        assert!(is_submit_key("Enter"));
        assert!(!is_submit_key("Tab"));
    }

    #[test]
    fn staff_dashboard_follows_session() {
        for persona in [Persona::Admin, Persona::Agent] {
            let signed_in = session_chrome(persona, true);
            assert_eq!(signed_in.dashboard, Some(true));
            assert_eq!(signed_in.navbar, Some(true));
            assert_eq!(signed_in.logout_button, None);
            assert_eq!(session_chrome(persona, false).dashboard, Some(false));
        }
    }

    #[test]
    fn public_logout_button_follows_session() {
        assert_eq!(session_chrome(Persona::User, true).logout_button, Some(true));
        assert_eq!(session_chrome(Persona::User, false).logout_button, Some(false));
        assert_eq!(session_chrome(Persona::User, false).dashboard, None);
    }

    #[test]
    fn dashboard_list_lines() {
        let breakdown = SentimentBreakdown {
            positive: 3,
            neutral: 1,
            negative: 0,
        };
        assert_eq!(
            breakdown_lines(breakdown),
            vec!["Positive: 3", "Neutral: 1", "Negative: 0"]
        );

        let team = greenwells_widget_core::analytics::team_performance();
        let lines = team_lines(&team);
        assert_eq!(lines[0], "Active agents: 4 of 5");
        assert_eq!(lines[3], "Agent 1: 45 chats, 94% satisfaction");
        assert_eq!(lines.len(), 3 + team.agents.len());

        let entry = FeedbackDigest {
            name: "Jane".to_string(),
            rating: 5,
            sentiment: greenwells_widget_core::Sentiment::Positive,
            category: greenwells_widget_core::FeedbackCategory::LpgAndRefills,
            summary: "Fast refill".to_string(),
        };
        assert_eq!(digest_line(&entry), "Jane (5/5, LPG & Refills): Fast refill");
        assert_eq!(sentiment_class(&entry), "sentiment-positive");
    }
}
