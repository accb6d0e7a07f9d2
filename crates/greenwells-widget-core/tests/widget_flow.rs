use greenwells_widget_core::chat::{DEFAULT_REPLY, KISUMU_REPLY, REFILL_REPLY};
use greenwells_widget_core::storage::FEEDBACK_STORAGE_KEY;
use greenwells_widget_core::{
    DeferredEvent, FeedbackCategory, FeedbackFields, FeedbackRecord, KeyValueStore, MemoryStore,
    Persona, Sender, Sentiment, ViewGroupKind, WidgetConfig, WidgetController, WidgetError,
};

fn user_widget() -> WidgetController<MemoryStore> {
    WidgetController::new(Persona::User, WidgetConfig::default(), MemoryStore::new())
}

fn stored_feedback(controller: &WidgetController<MemoryStore>) -> Vec<FeedbackRecord> {
    let raw = controller
        .store()
        .primary()
        .get(FEEDBACK_STORAGE_KEY)
        .expect("memory store never fails")
        .unwrap_or_else(|| "[]".to_string());
    serde_json::from_str(&raw).expect("stored feedback is valid json")
}

#[test]
fn jane_submits_positive_lpg_feedback() {
    let mut widget = user_widget();
    let before = stored_feedback(&widget).len();

    widget.set_rating(5);
    let submitted = widget
        .submit_feedback(
            FeedbackFields {
                name: "Jane".to_string(),
                email: "j@x.com".to_string(),
                service_type: "LPG".to_string(),
                comments: "great".to_string(),
            },
            1_717_171_717_000,
        )
        .expect("feedback accepted");

    assert_eq!(submitted.receipt.sentiment, Sentiment::Positive);
    assert_eq!(widget.feedback().len(), 1);
    assert_eq!(stored_feedback(&widget).len(), before + 1);
    assert_eq!(stored_feedback(&widget), widget.feedback().records());

    let projection = widget.projection();
    assert_eq!(
        projection.summary_text.as_deref(),
        Some("Positive feedback detected — user appreciated the service quality.")
    );
    assert!(projection.banner.success_visible);
    assert_eq!(projection.rating, 0);
    assert!(projection.lit_stars.iter().all(|lit| !lit));

    widget.advance_to(1_717_171_717_000 + 5_000);
    assert!(!widget.projection().banner.success_visible);
}

#[test]
fn feedback_survives_a_reload() {
    let mut widget = user_widget();
    widget.set_rating(3);
    widget
        .submit_feedback(FeedbackFields::default(), 0)
        .expect("feedback accepted");
    let raw = widget
        .store()
        .primary()
        .get(FEEDBACK_STORAGE_KEY)
        .expect("memory store never fails")
        .expect("feedback persisted");

    let reloaded = WidgetController::new(
        Persona::User,
        WidgetConfig::default(),
        MemoryStore::with_entries([(FEEDBACK_STORAGE_KEY, raw)]),
    );

    assert_eq!(reloaded.feedback().len(), 1);
    assert_eq!(reloaded.sentiment_breakdown().neutral, 1);
}

#[test]
fn lpg_refill_reply_arrives_after_delay() {
    let mut widget = user_widget();
    widget.open_chat();

    let task = widget
        .send_message("Where can I get an LPG refill?", 1_000)
        .expect("reply scheduled");
    assert_eq!(task.due_at_ms, 1_500);
    assert_eq!(widget.transcript().len(), 1);

    let event = widget.fire(task.id).expect("reply still pending");
    assert_eq!(
        event,
        DeferredEvent::BotReply {
            text: REFILL_REPLY.to_string(),
        }
    );
    let last = widget.transcript().last().expect("bot reply appended");
    assert_eq!(last.sender, Sender::Bot);
    assert_eq!(last.text, REFILL_REPLY);
    assert!(widget.fire(task.id).is_none());
}

#[test]
fn reply_rules_apply_in_order() {
    let mut widget = user_widget();
    widget.send_message("kisumu price", 0);
    widget.send_message("hi", 0);
    widget.advance_to(500);

    let bot = widget
        .transcript()
        .iter()
        .filter(|message| message.sender == Sender::Bot)
        .map(|message| message.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(bot, vec![KISUMU_REPLY, DEFAULT_REPLY]);
}

#[test]
fn blank_chat_input_adds_nothing() {
    let mut widget = user_widget();
    assert!(widget.send_message("", 0).is_none());
    assert!(widget.send_message("  \n\t", 0).is_none());
    assert!(widget.transcript().is_empty());
    assert_eq!(widget.pending_tasks(), 0);
}

#[test]
fn closing_chat_cancels_pending_reply() {
    let mut widget = user_widget();
    widget.open_chat();
    let task = widget
        .send_message("what are your opening hours?", 0)
        .expect("reply scheduled");

    assert_eq!(widget.close_chat(), 1);
    assert!(widget.fire(task.id).is_none());
    assert!(widget.advance_to(10_000).is_empty());
    assert_eq!(widget.transcript().len(), 1);
}

#[test]
fn agent_login_and_thread_switching() {
    let mut widget =
        WidgetController::new(Persona::Agent, WidgetConfig::default(), MemoryStore::new());

    let error = widget
        .login("admin", "admin123")
        .expect_err("admin pair does not open the agent console");
    assert_eq!(error, WidgetError::InvalidCredentials);
    assert!(widget.projection().login_error_visible);

    widget.login("agent", "agent123").expect("agent login");
    widget
        .switch_to(ViewGroupKind::ChatThread, "2")
        .expect("thread exists");
    let projection = widget.projection();
    assert!(projection.dashboard_visible);
    assert!(!projection.login_error_visible);
    assert_eq!(
        projection.active_thread.map(|thread| thread.customer_name),
        Some("James M.")
    );

    let error = widget
        .switch_to(ViewGroupKind::ChatThread, "4")
        .expect_err("unknown thread");
    assert!(matches!(error, WidgetError::NotFound { .. }));
    assert_eq!(widget.active(ViewGroupKind::ChatThread), Some("2"));
}

#[test]
fn admin_insights_reflect_stored_feedback() {
    let records = serde_json::json!([
        {"name": "A", "email": "a@x.com", "serviceType": "LPG", "rating": 5, "comments": "great", "timestamp": "t"},
        {"name": "B", "email": "b@x.com", "serviceType": "Fuel", "rating": 1, "comments": "bad", "timestamp": "t"}
    ]);
    let widget = WidgetController::new(
        Persona::Admin,
        WidgetConfig::default(),
        MemoryStore::with_entries([(FEEDBACK_STORAGE_KEY, records.to_string())]),
    );

    let metrics = widget.metrics();
    assert_eq!(metrics.total_feedback, 2);
    assert_eq!(metrics.positive_sentiment, "50.0%");
    assert_eq!(
        widget.insights()[0],
        "Customer satisfaction needs improvement. Review recent complaints."
    );
    assert_eq!(widget.render_chart()[6].title, "Sun: 72 feedback");

    let recent = widget.recent_feedback();
    assert_eq!(recent[0].name, "B");
    assert_eq!(recent[0].category, FeedbackCategory::Complaints);
    assert_eq!(recent[1].summary, "great");
}
