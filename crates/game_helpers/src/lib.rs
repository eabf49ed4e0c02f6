mod app;
pub use app::*;

pub mod floating_text;
pub mod gesture;
pub mod input;
