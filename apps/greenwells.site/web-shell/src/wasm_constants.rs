pub(crate) const CONFIG_OVERRIDES_GLOBAL: &str = "__GREENWELLS_WIDGET_CONFIG__";
pub(crate) const PERSONA_ATTRIBUTE: &str = "data-persona";

pub(crate) const HIDDEN_CLASS: &str = "hidden";
pub(crate) const ACTIVE_CLASS: &str = "active";

pub(crate) const LOGIN_MODAL_ID: &str = "login-modal";
pub(crate) const LOGIN_FORM_ID: &str = "login-form";
pub(crate) const LOGIN_USERNAME_ID: &str = "login-username";
pub(crate) const LOGIN_PASSWORD_ID: &str = "login-password";
pub(crate) const LOGIN_ERROR_ID: &str = "login-error";
pub(crate) const LOGOUT_BUTTON_ID: &str = "logout-btn";
pub(crate) const NAVBAR_ID: &str = "navbar";

pub(crate) const FEEDBACK_FORM_ID: &str = "feedback-form";
pub(crate) const FEEDBACK_NAME_ID: &str = "name";
pub(crate) const FEEDBACK_EMAIL_ID: &str = "email";
pub(crate) const FEEDBACK_SERVICE_TYPE_ID: &str = "service-type";
pub(crate) const FEEDBACK_COMMENTS_ID: &str = "comments";
pub(crate) const FEEDBACK_RATING_ID: &str = "rating";
pub(crate) const SUCCESS_MESSAGE_ID: &str = "success-message";
pub(crate) const AI_SUMMARY_ID: &str = "ai-summary";
pub(crate) const SUMMARY_TEXT_ID: &str = "summary-text";
pub(crate) const STAR_SELECTOR: &str = ".star";

pub(crate) const CHAT_OPEN_BUTTON_ID: &str = "chat-btn";
pub(crate) const CHAT_CLOSE_BUTTON_ID: &str = "close-chat";
pub(crate) const CHAT_POPUP_ID: &str = "chat-popup";
pub(crate) const CHAT_MESSAGES_ID: &str = "chat-messages";
pub(crate) const CHAT_INPUT_ID: &str = "chat-input";
pub(crate) const CHAT_SEND_BUTTON_ID: &str = "send-btn";
pub(crate) const ESCALATE_BUTTON_ID: &str = "escalate-btn";

pub(crate) const TREND_CHART_ID: &str = "trend-chart";
pub(crate) const CHART_BAR_CLASS: &str = "chart-bar";
pub(crate) const METRIC_TOTAL_ID: &str = "metric-total";
pub(crate) const METRIC_POSITIVE_ID: &str = "metric-positive";
pub(crate) const METRIC_RATING_ID: &str = "metric-rating";
pub(crate) const METRIC_ACCURACY_ID: &str = "metric-accuracy";
pub(crate) const INSIGHTS_LIST_ID: &str = "insights-list";
pub(crate) const RECENT_FEEDBACK_ID: &str = "recent-feedback";
pub(crate) const SENTIMENT_BREAKDOWN_ID: &str = "sentiment-breakdown";
pub(crate) const TEAM_PERFORMANCE_ID: &str = "team-performance";

pub(crate) const CURRENT_CUSTOMER_ID: &str = "current-customer";
pub(crate) const CURRENT_SENTIMENT_ID: &str = "current-sentiment";
pub(crate) const AGENT_INPUT_ID: &str = "agent-input";
pub(crate) const SUGGESTION_SELECTOR: &str = ".suggestion-btn";

pub(crate) const THEME_TOGGLE_SELECTOR: &str = ".toggle-btn";
pub(crate) const THEME_ATTRIBUTE: &str = "data-theme";
pub(crate) const LANGUAGE_SELECT_ID: &str = "language-select";
pub(crate) const AI_SLIDER_ID: &str = "ai-slider";
pub(crate) const SLIDER_LABEL_SELECTOR: &str = ".slider-value";
