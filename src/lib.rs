//! Clean Water Catch: click the clean drops, dodge the polluted ones.
//!
//! - `model`: difficulty table, milestones and the round reducer
//! - `components`: Yew UI (panels, play area, confetti overlay)
//! - `audio`: Web Audio tone cues
//! - `settings`: LocalStorage-backed player preferences
//! - `state`: canvas-side confetti particles

pub mod audio;
pub mod components;
pub mod error;
pub mod model;
pub mod settings;
pub mod state;
pub mod util;

pub use error::GameError;
pub use model::{Mode, RoundAction, RoundState};
