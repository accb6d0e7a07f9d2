use serde::Serialize;
use tracing::{debug, info};

use crate::analytics::{
    FeedbackDigest, FeedbackMetrics, RECENT_FEEDBACK_LIMIT, SentimentBreakdown, insights,
    recent_feedback, sentiment_breakdown,
};
use crate::chart::{ChartBar, render_chart};
use crate::chat::{
    ChatMessage, ChatThreadInfo, ChatTranscript, DEFAULT_CHAT_THREAD_ID, ESCALATION_CONNECTING,
    ESCALATION_QUEUED, Sender, chat_thread, generate_reply,
};
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::feedback::{
    FeedbackFields, FeedbackRecorder, STAR_COUNT, StarRating, StarState, SubmissionReceipt,
};
use crate::persona::{Capability, Persona, PersonaDescriptor};
use crate::scheduler::{DeferredEvent, ScheduledTask, TaskId, TaskScheduler, ViewScope};
use crate::session::SessionGate;
use crate::settings::{AiPersonality, SettingChange, Settings};
use crate::storage::{FallbackStore, KeyValueStore};
use crate::views::{DEFAULT_VIEW, ViewGroup, ViewGroupKind};

const ADMIN_VIEW: &str = "admin";
const DEFAULT_DASHBOARD_SECTION: &str = "overview";
const DEFAULT_SETTINGS_TAB: &str = "appearance";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateOutcome {
    Switched,
    /// The target sits behind the session gate; the login modal was opened instead.
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSubmitted {
    pub receipt: SubmissionReceipt,
    pub hide_banner: ScheduledTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeedbackBanner {
    pub success_visible: bool,
    pub summary_visible: bool,
}

/// Everything a host needs to paint the page after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetProjection {
    pub persona: Persona,
    pub authenticated: bool,
    pub login_modal_open: bool,
    pub login_error_visible: bool,
    pub dashboard_visible: bool,
    pub active_view: Option<&'static str>,
    pub active_section: Option<&'static str>,
    pub active_settings_tab: Option<&'static str>,
    pub active_thread: Option<ChatThreadInfo>,
    pub rating: u8,
    pub lit_stars: Vec<bool>,
    pub banner: FeedbackBanner,
    pub summary_text: Option<String>,
    pub chat_open: bool,
    pub messages: Vec<ChatMessage>,
    pub agent_draft: String,
    pub settings: Settings,
    pub personality_label: String,
    pub dark_mode: bool,
    pub feedback_count: usize,
    pub storage_degraded: bool,
}

/// Single owner of all widget state for one page and persona.
pub struct WidgetController<S> {
    descriptor: PersonaDescriptor,
    config: WidgetConfig,
    store: FallbackStore<S>,
    gate: SessionGate,
    login_modal_open: bool,
    top_level: ViewGroup,
    sections: ViewGroup,
    settings_tabs: ViewGroup,
    threads: ViewGroup,
    feedback: FeedbackRecorder,
    stars: StarRating,
    banner: FeedbackBanner,
    summary_text: Option<String>,
    chat_open: bool,
    transcript: ChatTranscript,
    agent_draft: String,
    settings: Settings,
    scheduler: TaskScheduler,
}

impl<S: KeyValueStore> WidgetController<S> {
    /// Restores the session flag, stored feedback and settings.
    pub fn new(persona: Persona, config: WidgetConfig, store: S) -> Self {
        let descriptor = PersonaDescriptor::for_persona(persona);
        let store = FallbackStore::new(store);
        let mut gate = SessionGate::new(descriptor.gate);
        gate.restore(&store);
        let feedback = FeedbackRecorder::load(&store);
        let settings = Settings::load(&store);
        let login_modal_open = persona != Persona::User && !gate.is_authenticated();

        info!(
            persona = %persona,
            authenticated = gate.is_authenticated(),
            feedback = feedback.len(),
            "widget controller ready"
        );

        Self {
            descriptor,
            config,
            store,
            gate,
            login_modal_open,
            top_level: ViewGroup::with_active(ViewGroupKind::TopLevelView, DEFAULT_VIEW),
            sections: ViewGroup::with_active(
                ViewGroupKind::DashboardSection,
                DEFAULT_DASHBOARD_SECTION,
            ),
            settings_tabs: ViewGroup::with_active(ViewGroupKind::SettingsTab, DEFAULT_SETTINGS_TAB),
            threads: ViewGroup::with_active(ViewGroupKind::ChatThread, DEFAULT_CHAT_THREAD_ID),
            feedback,
            stars: StarRating::default(),
            banner: FeedbackBanner::default(),
            summary_text: None,
            chat_open: false,
            transcript: ChatTranscript::default(),
            agent_draft: String::new(),
            settings,
            scheduler: TaskScheduler::default(),
        }
    }

    pub fn persona(&self) -> Persona {
        self.descriptor.persona
    }

    pub fn descriptor(&self) -> &PersonaDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn store(&self) -> &FallbackStore<S> {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), WidgetError> {
        self.gate.login(&mut self.store, username, password)?;
        self.login_modal_open = false;
        if self.descriptor.persona == Persona::User {
            self.top_level.switch_to(ADMIN_VIEW)?;
        }
        Ok(())
    }

    pub fn logout(&mut self) {
        self.gate.logout(&mut self.store);
        match self.descriptor.persona {
            Persona::User => {
                // DEFAULT_VIEW is always a member of the top-level group.
                let _ = self.top_level.switch_to(DEFAULT_VIEW);
            }
            Persona::Admin | Persona::Agent => self.login_modal_open = true,
        }
    }

    /// Top-level navigation. The admin view is gated for the public persona.
    pub fn navigate(&mut self, key: &str) -> Result<NavigateOutcome, WidgetError> {
        if key == ADMIN_VIEW
            && self.descriptor.persona == Persona::User
            && !self.gate.is_authenticated()
        {
            self.login_modal_open = true;
            return Ok(NavigateOutcome::LoginRequired);
        }
        self.top_level.switch_to(key)?;
        Ok(NavigateOutcome::Switched)
    }

    /// Top-level switches go through [`Self::navigate`] so the admin gate holds.
    pub fn switch_to(&mut self, group: ViewGroupKind, key: &str) -> Result<(), WidgetError> {
        match group {
            ViewGroupKind::TopLevelView => self.navigate(key).map(|_| ()),
            ViewGroupKind::DashboardSection => self.sections.switch_to(key),
            ViewGroupKind::SettingsTab => self.settings_tabs.switch_to(key),
            ViewGroupKind::ChatThread => self.threads.switch_to(key),
        }
    }

    pub fn active(&self, group: ViewGroupKind) -> Option<&'static str> {
        self.group(group).active()
    }

    pub fn markers(&self, group: ViewGroupKind) -> Vec<(&'static str, bool)> {
        self.group(group).markers()
    }

    fn group(&self, group: ViewGroupKind) -> &ViewGroup {
        match group {
            ViewGroupKind::TopLevelView => &self.top_level,
            ViewGroupKind::DashboardSection => &self.sections,
            ViewGroupKind::SettingsTab => &self.settings_tabs,
            ViewGroupKind::ChatThread => &self.threads,
        }
    }

    pub fn active_thread(&self) -> Option<ChatThreadInfo> {
        self.threads.active().and_then(chat_thread)
    }

    pub fn set_rating(&mut self, value: u8) -> u8 {
        self.stars.set(value)
    }

    pub fn hover_rating(&mut self, value: u8) {
        self.stars.hover(value);
    }

    pub fn end_hover(&mut self) {
        self.stars.end_hover();
    }

    pub fn star_states(&self) -> [StarState; STAR_COUNT] {
        self.stars.star_states()
    }

    pub fn submit_feedback(
        &mut self,
        fields: FeedbackFields,
        now_ms: u64,
    ) -> Result<FeedbackSubmitted, WidgetError> {
        self.require(Capability::Rate)?;
        let receipt = self
            .feedback
            .append(&mut self.store, fields, self.stars.value(), now_ms)?;

        self.banner = FeedbackBanner {
            success_visible: true,
            summary_visible: true,
        };
        self.summary_text = Some(receipt.summary.clone());
        self.stars.reset();

        // A newer banner gets its own full display time.
        self.scheduler.cancel_scope(ViewScope::FeedbackBanner);
        let hide_banner = self.scheduler.schedule(
            ViewScope::FeedbackBanner,
            now_ms,
            self.config.banner_hide_delay_ms,
            DeferredEvent::HideFeedbackBanners,
        );
        info!(
            sentiment = %receipt.sentiment,
            total = receipt.total_records,
            "feedback recorded"
        );
        Ok(FeedbackSubmitted {
            receipt,
            hide_banner,
        })
    }

    pub fn feedback(&self) -> &FeedbackRecorder {
        &self.feedback
    }

    pub fn open_chat(&mut self) {
        self.chat_open = true;
    }

    /// Hides the popup and drops any reply still pending for it.
    pub fn close_chat(&mut self) -> usize {
        self.chat_open = false;
        self.scheduler.cancel_scope(ViewScope::ChatPopup)
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    /// Appends the visitor's line and schedules the canned reply. Blank input
    /// does nothing.
    pub fn send_message(&mut self, text: &str, now_ms: u64) -> Option<ScheduledTask> {
        if !self.transcript.push(Sender::User, text) {
            return None;
        }
        let reply = generate_reply(text);
        debug!(reply, "queued canned reply");
        Some(self.scheduler.schedule(
            ViewScope::ChatPopup,
            now_ms,
            self.config.reply_delay_ms,
            DeferredEvent::BotReply {
                text: reply.to_string(),
            },
        ))
    }

    pub fn escalate(&mut self, now_ms: u64) -> Result<ScheduledTask, WidgetError> {
        self.require(Capability::Escalate)?;
        self.transcript.push(Sender::Bot, ESCALATION_CONNECTING);
        Ok(self.scheduler.schedule(
            ViewScope::ChatPopup,
            now_ms,
            self.config.escalation_delay_ms,
            DeferredEvent::BotNotice {
                text: ESCALATION_QUEUED.to_string(),
            },
        ))
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn insert_suggestion(&mut self, text: &str) {
        self.agent_draft = text.to_string();
    }

    pub fn agent_draft(&self) -> &str {
        &self.agent_draft
    }

    /// Applies a task whose host timer elapsed. Cancelled or already fired
    /// tasks are ignored.
    pub fn fire(&mut self, id: TaskId) -> Option<DeferredEvent> {
        let event = self.scheduler.take(id)?;
        self.apply_deferred(&event);
        Some(event)
    }

    /// Fires every task due at `now_ms`, earliest first.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<DeferredEvent> {
        self.scheduler
            .take_due(now_ms)
            .into_iter()
            .map(|(_, event)| {
                self.apply_deferred(&event);
                event
            })
            .collect()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    fn apply_deferred(&mut self, event: &DeferredEvent) {
        match event {
            DeferredEvent::BotReply { text } | DeferredEvent::BotNotice { text } => {
                self.transcript.push(Sender::Bot, text);
            }
            DeferredEvent::HideFeedbackBanners => {
                self.banner = FeedbackBanner::default();
            }
        }
    }

    pub fn apply_setting(&mut self, change: SettingChange) {
        self.settings.apply(&mut self.store, change);
    }

    /// Slider positions outside 1..=3 are ignored.
    pub fn apply_personality_slider(&mut self, value: u8) -> Option<AiPersonality> {
        let personality = AiPersonality::from_slider(value)?;
        self.apply_setting(SettingChange::AiPersonality(personality));
        Some(personality)
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn render_chart(&self) -> Vec<ChartBar> {
        render_chart(&self.config.weekly_dataset)
    }

    pub fn metrics(&self) -> FeedbackMetrics {
        FeedbackMetrics::from_records(self.feedback.records())
    }

    pub fn sentiment_breakdown(&self) -> SentimentBreakdown {
        sentiment_breakdown(self.feedback.records())
    }

    pub fn insights(&self) -> Vec<&'static str> {
        insights(self.feedback.records())
    }

    pub fn recent_feedback(&self) -> Vec<FeedbackDigest> {
        recent_feedback(self.feedback.records(), RECENT_FEEDBACK_LIMIT)
    }

    pub fn projection(&self) -> WidgetProjection {
        let authenticated = self.gate.is_authenticated();
        WidgetProjection {
            persona: self.descriptor.persona,
            authenticated,
            login_modal_open: self.login_modal_open,
            login_error_visible: self.gate.error_visible(),
            dashboard_visible: authenticated,
            active_view: self.top_level.active(),
            active_section: self.sections.active(),
            active_settings_tab: self.settings_tabs.active(),
            active_thread: self.active_thread(),
            rating: self.stars.value(),
            lit_stars: self
                .stars
                .star_states()
                .iter()
                .map(|state| *state == StarState::Lit)
                .collect(),
            banner: self.banner,
            summary_text: self.summary_text.clone(),
            chat_open: self.chat_open,
            messages: self.transcript.messages().to_vec(),
            agent_draft: self.agent_draft.clone(),
            settings: self.settings,
            personality_label: self.settings.ai_personality.label(),
            dark_mode: self.settings.theme.is_dark(),
            feedback_count: self.feedback.len(),
            storage_degraded: self.store.is_degraded(),
        }
    }

    /// Cancels every pending task. Called when the page unloads.
    pub fn teardown(&mut self) -> usize {
        self.chat_open = false;
        let cancelled = self.scheduler.cancel_all();
        debug!(cancelled, "widget controller torn down");
        cancelled
    }

    fn require(&self, capability: Capability) -> Result<(), WidgetError> {
        if self.descriptor.capabilities.allows(capability) {
            Ok(())
        } else {
            Err(WidgetError::CapabilityDenied {
                persona: self.descriptor.persona,
                capability,
            })
        }
    }
}
