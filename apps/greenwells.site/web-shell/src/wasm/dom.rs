use greenwells_widget_core::analytics::team_performance;
use greenwells_widget_core::settings::{DARK_MODE_BODY_CLASS, translate};

use super::*;

pub(super) fn install_handlers(window: &web_sys::Window, document: &Document, persona: Persona) {
    if let Some(form) = document.get_element_by_id(LOGIN_FORM_ID) {
        let doc = document.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            submit_login(&doc);
        });
    }
    on_click_id(document, LOGOUT_BUTTON_ID, || {
        with_controller(|controller| controller.logout());
        render();
    });

    for group in [
        ViewGroupKind::TopLevelView,
        ViewGroupKind::DashboardSection,
        ViewGroupKind::SettingsTab,
        ViewGroupKind::ChatThread,
    ] {
        for control in query_all(document, &format!(".{}", group.control_class())) {
            let Some(key) = control.get_attribute(group.key_attribute()) else {
                continue;
            };
            listen(&control, "click", move |_event| {
                if group == ViewGroupKind::TopLevelView {
                    navigate(&key);
                } else {
                    switch_group(group, &key);
                }
            });
        }
    }

    if persona == Persona::User {
        install_feedback_handlers(document);
        install_chat_handlers(document);
    }
    if persona == Persona::Agent || persona == Persona::User {
        install_agent_handlers(document);
    }
    install_settings_handlers(document);

    listen(window, "pagehide", |_event| {
        let cancelled = with_controller(|controller| controller.teardown()).unwrap_or(0);
        if cancelled > 0 {
            log_info(&format!("dropped {cancelled} pending widget updates on page exit"));
        }
    });
}

fn install_feedback_handlers(document: &Document) {
    for star in query_all(document, STAR_SELECTOR) {
        let Some(value) = star
            .get_attribute("data-value")
            .as_deref()
            .and_then(parse_small_number)
        else {
            continue;
        };
        let doc = document.clone();
        listen(&star, "click", move |_event| {
            if let Some(rating) = with_controller(|controller| controller.set_rating(value)) {
                if let Some(input) = input_element(&doc, FEEDBACK_RATING_ID) {
                    input.set_value(&rating.to_string());
                }
            }
            render();
        });
        listen(&star, "mouseover", move |_event| {
            with_controller(|controller| controller.hover_rating(value));
            render();
        });
        listen(&star, "mouseout", |_event| {
            with_controller(|controller| controller.end_hover());
            render();
        });
    }

    if let Some(form) = document.get_element_by_id(FEEDBACK_FORM_ID) {
        let doc = document.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            submit_feedback(&doc);
        });
    }
}

fn install_chat_handlers(document: &Document) {
    on_click_id(document, CHAT_OPEN_BUTTON_ID, || {
        with_controller(|controller| controller.open_chat());
        render();
    });
    on_click_id(document, CHAT_CLOSE_BUTTON_ID, || {
        with_controller(|controller| controller.close_chat());
        render();
    });
    let doc = document.clone();
    on_click_id(document, CHAT_SEND_BUTTON_ID, move || send_chat_message(&doc));
    on_click_id(document, ESCALATE_BUTTON_ID, escalate_chat);

    if let Some(input) = document.get_element_by_id(CHAT_INPUT_ID) {
        let doc = document.clone();
        let callback = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |event| {
            if is_submit_key(&event.key()) {
                send_chat_message(&doc);
            }
        }));
        let _ = input.add_event_listener_with_callback("keypress", callback.as_ref().unchecked_ref());
        KEY_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
    }
}

fn install_agent_handlers(document: &Document) {
    for button in query_all(document, SUGGESTION_SELECTOR) {
        let text = button.text_content().unwrap_or_default();
        let doc = document.clone();
        listen(&button, "click", move |_event| {
            with_controller(|controller| controller.insert_suggestion(&text));
            if let Some(input) = input_element(&doc, AGENT_INPUT_ID) {
                input.set_value(&text);
            }
        });
    }
}

fn install_settings_handlers(document: &Document) {
    for toggle in query_all(document, THEME_TOGGLE_SELECTOR) {
        let Some(theme) = toggle
            .get_attribute(THEME_ATTRIBUTE)
            .as_deref()
            .and_then(Theme::parse)
        else {
            continue;
        };
        listen(&toggle, "click", move |_event| {
            apply_setting(SettingChange::Theme(theme));
        });
    }

    if let Some(select) = document.get_element_by_id(LANGUAGE_SELECT_ID) {
        let doc = document.clone();
        listen(&select, "change", move |_event| {
            let raw = field_value(&doc, LANGUAGE_SELECT_ID);
            match Language::parse(&raw) {
                Some(language) => apply_setting(SettingChange::Language(language)),
                None => log_warn(&format!("unsupported language '{raw}'")),
            }
        });
    }

    if let Some(slider) = document.get_element_by_id(AI_SLIDER_ID) {
        let doc = document.clone();
        listen(&slider, "input", move |_event| {
            let raw = field_value(&doc, AI_SLIDER_ID);
            let applied = parse_small_number(&raw).and_then(|value| {
                with_controller(|controller| controller.apply_personality_slider(value)).flatten()
            });
            if applied.is_none() {
                log_warn(&format!("ignoring slider position '{raw}'"));
            }
            render();
        });
    }
}

/// Static labels marked with `data-i18n`. Applied once at startup; a language
/// change is persisted and takes effect on the next load.
pub(super) fn apply_translations(document: &Document, language: Language) {
    for element in query_all(document, "[data-i18n]") {
        let Some(key) = element
            .get_attribute("data-i18n")
            .as_deref()
            .and_then(TranslationKey::parse)
        else {
            continue;
        };
        element.set_text_content(Some(translate(language, key)));
    }
}

pub(super) fn render_projection(
    document: &Document,
    projection: &WidgetProjection,
    dashboard_id: &str,
) {
    set_hidden(document, LOGIN_MODAL_ID, !projection.login_modal_open);
    set_hidden(document, LOGIN_ERROR_ID, !projection.login_error_visible);
    let chrome = session_chrome(projection.persona, projection.dashboard_visible);
    if let Some(visible) = chrome.dashboard {
        if let Some(dashboard) = document.get_element_by_id(dashboard_id) {
            set_class(&dashboard, HIDDEN_CLASS, !visible);
            set_class(&dashboard, ACTIVE_CLASS, visible);
        }
    }
    if let Some(visible) = chrome.navbar {
        set_hidden(document, NAVBAR_ID, !visible);
    }
    if let Some(visible) = chrome.logout_button {
        set_hidden(document, LOGOUT_BUTTON_ID, !visible);
    }

    render_group(document, ViewGroupKind::TopLevelView, projection.active_view);
    render_group(document, ViewGroupKind::DashboardSection, projection.active_section);
    render_group(document, ViewGroupKind::SettingsTab, projection.active_settings_tab);
    render_group(
        document,
        ViewGroupKind::ChatThread,
        projection.active_thread.map(|thread| thread.id),
    );
    if let Some(thread) = projection.active_thread {
        set_text(document, CURRENT_CUSTOMER_ID, thread.customer_name);
        if let Some(tag) = document.get_element_by_id(CURRENT_SENTIMENT_ID) {
            tag.set_text_content(Some(thread.sentiment_label));
            tag.set_class_name(&thread.sentiment_class());
        }
    }

    for (index, star) in query_all(document, STAR_SELECTOR).into_iter().enumerate() {
        let lit = projection.lit_stars.get(index).copied().unwrap_or(false);
        set_class(&star, ACTIVE_CLASS, index < usize::from(projection.rating));
        if let Ok(star) = star.dyn_into::<HtmlElement>() {
            let _ = star.style().set_property("color", star_color(lit));
        }
    }
    set_hidden(document, SUCCESS_MESSAGE_ID, !projection.banner.success_visible);
    set_hidden(document, AI_SUMMARY_ID, !projection.banner.summary_visible);
    if let Some(summary) = projection.summary_text.as_deref() {
        set_text(document, SUMMARY_TEXT_ID, summary);
    }

    set_hidden(document, CHAT_POPUP_ID, !projection.chat_open);
    render_messages(document, projection);

    if let Some(body) = document.body() {
        set_class(&body, DARK_MODE_BODY_CLASS, projection.dark_mode);
    }
    for toggle in query_all(document, THEME_TOGGLE_SELECTOR) {
        let active = toggle.get_attribute(THEME_ATTRIBUTE).as_deref()
            == Some(projection.settings.theme.as_str());
        set_class(&toggle, ACTIVE_CLASS, active);
    }
    set_field_value(document, LANGUAGE_SELECT_ID, projection.settings.language.as_str());
    set_field_value(
        document,
        AI_SLIDER_ID,
        &projection.settings.ai_personality.slider_value().to_string(),
    );
    if let Ok(Some(label)) = document.query_selector(SLIDER_LABEL_SELECTOR) {
        label.set_text_content(Some(&projection.personality_label));
    }

    if projection.dashboard_visible {
        render_dashboard(document);
    }
}

fn render_group(document: &Document, group: ViewGroupKind, active: Option<&str>) {
    for key in group.keys() {
        let is_active = active == Some(*key);
        if let Some(panel) = group
            .panel_id(key)
            .and_then(|id| document.get_element_by_id(&id))
        {
            set_class(&panel, ACTIVE_CLASS, is_active);
        }
    }
    for control in query_all(document, &format!(".{}", group.control_class())) {
        let is_active = active.is_some()
            && control.get_attribute(group.key_attribute()).as_deref() == active;
        set_class(&control, ACTIVE_CLASS, is_active);
    }
}

fn render_messages(document: &Document, projection: &WidgetProjection) {
    let Some(container) = document.get_element_by_id(CHAT_MESSAGES_ID) else {
        return;
    };
    let rendered = usize::try_from(container.child_element_count()).unwrap_or(usize::MAX);
    if rendered > projection.messages.len() {
        container.set_inner_html("");
    }
    let rendered = usize::try_from(container.child_element_count()).unwrap_or(0);
    for message in projection.messages.iter().skip(rendered) {
        let Ok(bubble) = document.create_element("div") else {
            continue;
        };
        bubble.set_class_name(&bubble_class(message.sender));
        let Ok(paragraph) = document.create_element("p") else {
            continue;
        };
        paragraph.set_text_content(Some(&message.text));
        let _ = bubble.append_child(&paragraph);
        let _ = container.append_child(&bubble);
    }
    container.set_scroll_top(container.scroll_height());
}

fn render_dashboard(document: &Document) {
    let Some(snapshot) = CONTROLLER.with(|slot| {
        slot.borrow().as_ref().map(|controller| {
            (
                controller.render_chart(),
                controller.metrics(),
                controller.insights(),
                controller.sentiment_breakdown(),
                controller.recent_feedback(),
            )
        })
    }) else {
        return;
    };
    let (bars, metrics, insights, breakdown, recent) = snapshot;

    if let Some(chart) = document.get_element_by_id(TREND_CHART_ID) {
        if chart.child_element_count() == 0 {
            for bar in &bars {
                let Ok(element) = document.create_element("div") else {
                    continue;
                };
                element.set_class_name(CHART_BAR_CLASS);
                let _ = element.set_attribute("title", &bar.title);
                if let Ok(element) = element.dyn_into::<HtmlElement>() {
                    let _ = element.style().set_property("height", &bar.height_style());
                    let _ = chart.append_child(&element);
                }
            }
        }
    }

    set_text(document, METRIC_TOTAL_ID, &metrics.total_feedback.to_string());
    set_text(document, METRIC_POSITIVE_ID, &metrics.positive_sentiment);
    set_text(document, METRIC_RATING_ID, &metrics.average_rating.to_string());
    set_text(document, METRIC_ACCURACY_ID, &metrics.ai_accuracy);
    fill_list(
        document,
        INSIGHTS_LIST_ID,
        insights.into_iter().map(|insight| (insight.to_string(), None)),
    );
    fill_list(
        document,
        SENTIMENT_BREAKDOWN_ID,
        breakdown_lines(breakdown).into_iter().map(|line| (line, None)),
    );
    fill_list(
        document,
        RECENT_FEEDBACK_ID,
        recent
            .iter()
            .map(|entry| (digest_line(entry), Some(sentiment_class(entry)))),
    );
    if let Some(list) = document.get_element_by_id(TEAM_PERFORMANCE_ID) {
        if list.child_element_count() == 0 {
            fill_list(
                document,
                TEAM_PERFORMANCE_ID,
                team_lines(&team_performance())
                    .into_iter()
                    .map(|line| (line, None)),
            );
        }
    }
}

fn fill_list(
    document: &Document,
    id: &str,
    items: impl IntoIterator<Item = (String, Option<String>)>,
) {
    let Some(list) = document.get_element_by_id(id) else {
        return;
    };
    list.set_inner_html("");
    for (text, class) in items {
        let Ok(item) = document.create_element("li") else {
            continue;
        };
        if let Some(class) = class {
            item.set_class_name(&class);
        }
        item.set_text_content(Some(&text));
        let _ = list.append_child(&item);
    }
}

pub(super) fn field_value(document: &Document, id: &str) -> String {
    let Some(element) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    String::new()
}

fn set_field_value(document: &Document, id: &str, value: &str) {
    let Some(element) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if input.value() != value {
            input.set_value(value);
        }
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        if select.value() != value {
            select.set_value(value);
        }
    }
}

pub(super) fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

pub(super) fn reset_form(document: &Document, id: &str) {
    if let Some(form) = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    {
        form.reset();
    }
}

fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(element) = document.get_element_by_id(id) {
        set_class(&element, HIDDEN_CLASS, hidden);
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(element) = document.get_element_by_id(id) {
        element.set_text_content(Some(text));
    }
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
    let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    EVENT_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
}

fn on_click_id(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
    if let Some(element) = document.get_element_by_id(id) {
        listen(&element, "click", move |_event| handler());
    }
}
