pub mod app;
pub mod event;
pub mod hover;
pub mod input;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::{Animator, App};
pub use theme::Theme;
pub use themes::load_theme;
