//! Host-independent state for the Green Wells feedback and support chat
//! widget. Browser shells feed DOM events in and paint [`WidgetProjection`]
//! back out; everything here runs and tests natively.

pub mod analytics;
pub mod chart;
pub mod chat;
pub mod config;
pub mod controller;
pub mod dom_contract;
pub mod error;
pub mod feedback;
pub mod persona;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod storage;
pub mod views;

pub use analytics::{
    AgentPerformance, FeedbackCategory, FeedbackDigest, FeedbackMetrics, SentimentBreakdown,
    TeamPerformance,
};
pub use chart::{ChartBar, DatasetPoint};
pub use chat::{ChatMessage, ChatThreadInfo, Sender};
pub use config::WidgetConfig;
pub use controller::{FeedbackSubmitted, NavigateOutcome, WidgetController, WidgetProjection};
pub use dom_contract::DomContract;
pub use error::{ConfigError, StorageError, WidgetError};
pub use feedback::{FeedbackFields, FeedbackRecord, Sentiment, derive_sentiment};
pub use persona::{Capability, Persona, PersonaDescriptor};
pub use scheduler::{DeferredEvent, ScheduledTask, TaskId, ViewScope};
pub use settings::{AiPersonality, Language, SettingChange, Settings, Theme, TranslationKey};
pub use storage::{FallbackStore, KeyValueStore, MemoryStore};
pub use views::ViewGroupKind;
