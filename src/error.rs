use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures coming out of the browser surface. None of these are fatal: callers
/// log them and carry on without the affected feature.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("unknown difficulty mode `{0}`")]
    UnknownMode(String),
    #[error("canvas 2d context unavailable")]
    NoCanvasContext,
    #[error("local storage unavailable")]
    StorageUnavailable,
    #[error("settings could not be decoded: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("audio unavailable: {0}")]
    Audio(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
