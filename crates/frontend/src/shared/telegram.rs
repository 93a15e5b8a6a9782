//! Telegram Mini App handshake over `window.Telegram.WebApp`.
//!
//! Outside Telegram (plain browser) the object is missing; every call is
//! then a logged no-op.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub const HEADER_COLOR: &str = "#4A90E2";
pub const BACKGROUND_COLOR: &str = "#FAFBFC";
pub const MAIN_BUTTON_TEXT: &str = "Головна";

fn web_app() -> Option<JsValue> {
    let window = web_sys::window()?;
    let telegram = Reflect::get(&window, &JsValue::from_str("Telegram")).ok()?;
    if telegram.is_undefined() || telegram.is_null() {
        return None;
    }
    let app = Reflect::get(&telegram, &JsValue::from_str("WebApp")).ok()?;
    if app.is_undefined() || app.is_null() {
        None
    } else {
        Some(app)
    }
}

/// `target.name(args...)`
fn call(target: &JsValue, name: &str, args: &[&str]) -> Result<(), JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    match args {
        [] => method.call0(target)?,
        [a] => method.call1(target, &JsValue::from_str(a))?,
        _ => {
            let array = js_sys::Array::new();
            for arg in args {
                array.push(&JsValue::from_str(arg));
            }
            method.apply(target, &array)?
        }
    };
    Ok(())
}

fn set(target: &JsValue, name: &str, value: &str) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(name), &JsValue::from_str(value))?;
    Ok(())
}

fn init_web_app(app: &JsValue) -> Result<(), JsValue> {
    call(app, "ready", &[])?;
    call(app, "expand", &[])?;
    call(app, "setHeaderColor", &[HEADER_COLOR])?;
    call(app, "setBackgroundColor", &[BACKGROUND_COLOR])?;
    call(app, "enableClosingConfirmation", &[])?;

    let button = Reflect::get(app, &JsValue::from_str("MainButton"))?;
    if !button.is_undefined() {
        call(&button, "setText", &[MAIN_BUTTON_TEXT])?;
        set(&button, "color", HEADER_COLOR)?;
    }
    Ok(())
}

/// Вызывается один раз при старте приложения.
pub fn init() {
    let Some(app) = web_app() else {
        log::info!("Telegram WebApp not found, running in a plain browser");
        return;
    };
    match init_web_app(&app) {
        Ok(()) => log::info!("Telegram WebApp initialized"),
        Err(e) => log::warn!("Telegram WebApp init failed: {:?}", e),
    }
}

/// Прячет главную кнопку при размонтировании приложения.
pub fn hide_main_button() {
    let Some(app) = web_app() else {
        return;
    };
    let result = Reflect::get(&app, &JsValue::from_str("MainButton"))
        .and_then(|button| call(&button, "hide", &[]));
    if let Err(e) = result {
        log::warn!("MainButton.hide failed: {:?}", e);
    }
}
