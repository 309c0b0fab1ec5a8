mod slot_text;
mod status_bar;

pub use slot_text::{SlotTextWidget, SlotWordsWidget};
pub use status_bar::StatusBarWidget;
