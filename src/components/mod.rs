pub mod app;
pub mod confetti_canvas;
pub mod controls_panel;
pub mod feedback_layer;
pub mod game_area;
pub mod message_banner;
pub mod stats_panel;

pub use app::App;
