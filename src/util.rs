// Browser helpers shared by the components

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error::GameError;

pub fn window() -> Result<web_sys::Window, GameError> {
    web_sys::window().ok_or(GameError::NoWindow)
}

/// Uniform value in `[0, 1)`.
pub fn rand_unit() -> f64 {
    js_sys::Math::random()
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// A `setInterval` registration that is cleared when dropped.
pub struct Interval {
    window: web_sys::Window,
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: u32, f: impl FnMut() + 'static) -> Result<Self, GameError> {
        let window = window()?;
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self { window, id, _closure: closure })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}
