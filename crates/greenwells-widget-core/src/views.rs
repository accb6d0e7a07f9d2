use std::fmt;

use serde::Serialize;

use crate::error::WidgetError;

pub const TOP_LEVEL_VIEWS: [&str; 3] = ["user", "admin", "agent"];
pub const DASHBOARD_SECTIONS: [&str; 5] = ["overview", "feedback", "chats", "insights", "team"];
pub const SETTINGS_TABS: [&str; 3] = ["appearance", "language", "assistant"];
pub const CHAT_THREAD_IDS: [&str; 3] = ["1", "2", "3"];

pub const DEFAULT_VIEW: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewGroupKind {
    TopLevelView,
    DashboardSection,
    SettingsTab,
    ChatThread,
}

impl ViewGroupKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLevelView => "view",
            Self::DashboardSection => "dashboard section",
            Self::SettingsTab => "settings tab",
            Self::ChatThread => "chat thread",
        }
    }

    #[must_use]
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Self::TopLevelView => &TOP_LEVEL_VIEWS,
            Self::DashboardSection => &DASHBOARD_SECTIONS,
            Self::SettingsTab => &SETTINGS_TABS,
            Self::ChatThread => &CHAT_THREAD_IDS,
        }
    }

    /// Class shared by every panel in the group.
    #[must_use]
    pub fn panel_class(self) -> &'static str {
        match self {
            Self::TopLevelView => "view",
            Self::DashboardSection => "dashboard-section",
            Self::SettingsTab => "settings-tab-content",
            Self::ChatThread => "chat-item",
        }
    }

    /// Class shared by the controls that select a panel.
    #[must_use]
    pub fn control_class(self) -> &'static str {
        match self {
            Self::TopLevelView => "nav-btn",
            Self::DashboardSection => "sidebar-item",
            Self::SettingsTab => "settings-tab",
            Self::ChatThread => "chat-item",
        }
    }

    /// Data attribute carrying the key on each control.
    #[must_use]
    pub fn key_attribute(self) -> &'static str {
        match self {
            Self::TopLevelView => "data-view",
            Self::DashboardSection => "data-section",
            Self::SettingsTab => "data-tab",
            Self::ChatThread => "data-chat-id",
        }
    }

    /// Element id of the panel for `key`. Chat threads have no separate panel.
    #[must_use]
    pub fn panel_id(self, key: &str) -> Option<String> {
        match self {
            Self::TopLevelView => Some(format!("{key}-view")),
            Self::DashboardSection => Some(format!("{key}-section")),
            Self::SettingsTab => Some(format!("{key}-tab")),
            Self::ChatThread => None,
        }
    }
}

impl fmt::Display for ViewGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of mutually exclusive siblings. At most one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewGroup {
    kind: ViewGroupKind,
    active: Option<usize>,
}

impl ViewGroup {
    pub fn new(kind: ViewGroupKind) -> Self {
        Self { kind, active: None }
    }

    pub fn with_active(kind: ViewGroupKind, key: &str) -> Self {
        let mut group = Self::new(kind);
        let _ = group.switch_to(key);
        group
    }

    pub fn kind(&self) -> ViewGroupKind {
        self.kind
    }

    pub fn switch_to(&mut self, key: &str) -> Result<(), WidgetError> {
        let Some(index) = self.kind.keys().iter().position(|candidate| *candidate == key) else {
            return Err(WidgetError::NotFound {
                group: self.kind,
                key: key.to_string(),
            });
        };
        self.active = Some(index);
        Ok(())
    }

    pub fn active(&self) -> Option<&'static str> {
        self.active
            .and_then(|index| self.kind.keys().get(index).copied())
    }

    /// Every sibling paired with its active marker, in declaration order.
    pub fn markers(&self) -> Vec<(&'static str, bool)> {
        self.kind
            .keys()
            .iter()
            .enumerate()
            .map(|(index, key)| (*key, self.active == Some(index)))
            .collect()
    }
}
