use super::*;

pub(super) fn set_phase(phase: &str) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.phase = phase.to_string();
        if phase != "error" {
            state.last_error = None;
        }
    });
}

pub(super) fn set_boot_error(message: &str) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.phase = "error".to_string();
        state.last_error = Some(message.to_string());
    });
    log_error(&format!("widget startup failed: {message}"));
}

/// Warns once when the controller falls back to in-memory storage.
pub(super) fn note_storage_state(degraded: bool) {
    let newly_degraded = DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        let flipped = degraded && !state.storage_degraded;
        state.storage_degraded = degraded;
        flipped
    });
    if newly_degraded {
        log_warn("local storage is unavailable; widget state will not survive a reload");
    }
}

pub(super) fn log_info(message: &str) {
    web_sys::console::info_1(&JsValue::from_str(message));
}

pub(super) fn log_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

pub(super) fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Reads `window.__GREENWELLS_WIDGET_CONFIG__`, either a JSON string or a plain object.
pub(super) fn read_config_overrides(window: &web_sys::Window) -> Option<String> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_OVERRIDES_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|raw| raw.as_string())
}

pub(super) fn epoch_millis_now() -> u64 {
    clamp_ms(js_sys::Date::now())
}

pub(super) fn clamp_ms(value: f64) -> u64 {
    if !value.is_finite() || value.is_sign_negative() {
        return 0;
    }
    value.floor().min(u64::MAX as f64) as u64
}
