pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod glyphs;
pub mod sequencer;
pub mod timer;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ThemeColorOverrides, ThemeConfig};
pub use easing::{CubicBezier, EasingType};
pub use error::{Error, Result};
pub use sequencer::{
    CharacterSequencer, Direction, Phase, ResumeMode, SequencerEvent, SlotOptions, WordEvent,
    WordOrder, WordSequencer,
};
