#[cfg(any(target_arch = "wasm32", test))]
mod page;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::time::Duration;

    use gloo_timers::future::sleep;
    use greenwells_widget_core::{
        DomContract, FeedbackFields, Language, NavigateOutcome, Persona, ScheduledTask,
        SettingChange, Theme, TranslationKey, ViewGroupKind, WidgetController, WidgetProjection,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{
        Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
        HtmlTextAreaElement, KeyboardEvent,
    };

    use crate::page::{
        ShellError, breakdown_lines, bubble_class, digest_line, is_submit_key, parse_small_number,
        resolve_config, resolve_persona, sentiment_class, session_chrome, star_color, team_lines,
    };
    use crate::wasm_constants::*;
    use crate::wasm_state::ShellDiagnostics;

    mod dom;
    mod lifecycle;
    mod storage;
    mod timers;

    use dom::*;
    use lifecycle::*;
    use storage::LocalStorageStore;
    use timers::*;

    type Controller = WidgetController<LocalStorageStore>;

    thread_local! {
        static CONTROLLER: RefCell<Option<Controller>> = const { RefCell::new(None) };
        static DIAGNOSTICS: RefCell<ShellDiagnostics> = RefCell::new(ShellDiagnostics::default());
        static EVENT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
        static KEY_HANDLERS: RefCell<Vec<Closure<dyn FnMut(KeyboardEvent)>>> = const { RefCell::new(Vec::new()) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        set_phase("booting");
        if let Err(error) = boot() {
            set_boot_error(&error.to_string());
        }
    }

    #[wasm_bindgen]
    pub fn widget_state_json() -> String {
        CONTROLLER.with(|slot| {
            slot.borrow()
                .as_ref()
                .and_then(|controller| serde_json::to_string(&controller.projection()).ok())
                .unwrap_or_else(|| "{}".to_string())
        })
    }

    #[wasm_bindgen]
    pub fn shell_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"last_error\":\"diagnostics serialization failed\"}"
                    .to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn advance_widget_clock(now_ms: f64) -> usize {
        let fired = with_controller(|controller| controller.advance_to(clamp_ms(now_ms)).len())
            .unwrap_or(0);
        if fired > 0 {
            render();
        }
        fired
    }

    fn boot() -> Result<(), ShellError> {
        let window = web_sys::window().ok_or(ShellError::MissingHost("window"))?;
        let document = window
            .document()
            .ok_or(ShellError::MissingHost("document"))?;
        let body = document
            .body()
            .ok_or(ShellError::MissingHost("document body"))?;

        let persona = resolve_persona(body.get_attribute(PERSONA_ATTRIBUTE).as_deref())?;
        let (config, config_error) = resolve_config(read_config_overrides(&window).as_deref());
        if let Some(error) = config_error {
            log_warn(&format!("{error}; using default widget timings"));
        }

        let contract = DomContract::for_persona(persona);
        let missing = contract.verify(|id| document.get_element_by_id(id).is_some())?;
        for id in &missing {
            log_warn(&format!("optional element #{id} is missing; skipping it"));
        }
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.persona = Some(persona.as_str().to_string());
            state.missing_optional_ids = missing.iter().map(|id| (*id).to_string()).collect();
        });

        let controller = WidgetController::new(persona, config, LocalStorageStore::open());
        let language = controller.settings().language;
        CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));

        apply_translations(&document, language);
        install_handlers(&window, &document, persona);
        render();
        set_phase("ready");
        Ok(())
    }

    fn with_controller<R>(f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        CONTROLLER.with(|slot| slot.borrow_mut().as_mut().map(f))
    }

    fn render() {
        let Some(projection) = CONTROLLER.with(|slot| {
            slot.borrow().as_ref().map(|controller| {
                (
                    controller.projection(),
                    controller.descriptor().dashboard_id(),
                )
            })
        }) else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let (projection, dashboard_id) = projection;
        render_projection(&document, &projection, &dashboard_id);
        note_storage_state(projection.storage_degraded);
    }

    fn submit_login(document: &Document) {
        let username = field_value(document, LOGIN_USERNAME_ID);
        let password = field_value(document, LOGIN_PASSWORD_ID);
        let Some(result) = with_controller(|controller| controller.login(&username, &password))
        else {
            return;
        };
        match result {
            Ok(()) => reset_form(document, LOGIN_FORM_ID),
            Err(error) => log_warn(&format!("login rejected: {error}")),
        }
        render();
    }

    fn submit_feedback(document: &Document) {
        let fields = FeedbackFields {
            name: field_value(document, FEEDBACK_NAME_ID),
            email: field_value(document, FEEDBACK_EMAIL_ID),
            service_type: field_value(document, FEEDBACK_SERVICE_TYPE_ID),
            comments: field_value(document, FEEDBACK_COMMENTS_ID),
        };
        let now_ms = epoch_millis_now();
        let Some(result) = with_controller(|controller| controller.submit_feedback(fields, now_ms))
        else {
            return;
        };
        match result {
            Ok(submitted) => {
                reset_form(document, FEEDBACK_FORM_ID);
                schedule_task(submitted.hide_banner);
            }
            Err(error) => log_error(&format!("feedback was not recorded: {error}")),
        }
        render();
    }

    fn send_chat_message(document: &Document) {
        let Some(input) = input_element(document, CHAT_INPUT_ID) else {
            return;
        };
        let text = input.value();
        let now_ms = epoch_millis_now();
        if let Some(task) = with_controller(|controller| controller.send_message(&text, now_ms))
            .flatten()
        {
            input.set_value("");
            schedule_task(task);
        }
        render();
    }

    fn escalate_chat() {
        let now_ms = epoch_millis_now();
        match with_controller(|controller| controller.escalate(now_ms)) {
            Some(Ok(task)) => schedule_task(task),
            Some(Err(error)) => log_warn(&format!("escalation refused: {error}")),
            None => {}
        }
        render();
    }

    fn navigate(key: &str) {
        match with_controller(|controller| controller.navigate(key)) {
            Some(Ok(NavigateOutcome::Switched | NavigateOutcome::LoginRequired)) | None => {}
            Some(Err(error)) => log_warn(&error.to_string()),
        }
        render();
    }

    fn switch_group(group: ViewGroupKind, key: &str) {
        if let Some(Err(error)) = with_controller(|controller| controller.switch_to(group, key)) {
            log_warn(&error.to_string());
        }
        render();
    }

    fn apply_setting(change: SettingChange) {
        with_controller(|controller| controller.apply_setting(change));
        render();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn widget_state_json() -> String {
    "{}".to_string()
}
