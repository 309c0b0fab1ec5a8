//! Scramble animation sequencers
//!
//! - `options` - run parameters and their defaults
//! - `chars` - animates a single string
//! - `words` - plays a list of strings through one character sequencer
//!
//! # Usage
//!
//! ```ignore
//! use slot_text_core::sequencer::{CharacterSequencer, SlotOptions};
//! use slot_text_core::clock::{Clock, SystemClock};
//!
//! let clock = SystemClock::new();
//! let mut seq = CharacterSequencer::new("hello", SlotOptions::default());
//! seq.start(clock.now());
//!
//! // In the render loop
//! for event in seq.advance(clock.now()) {
//!     // react to PhaseChanged / PassComplete
//! }
//! let frame = seq.text();
//! ```

use std::time::Duration;

pub mod chars;
pub mod options;
pub mod words;

pub use chars::{Cell, CellState, CharacterSequencer, Phase};
pub use options::{Direction, ResumeMode, SlotOptions, WordOrder, FRAME};
pub use words::{WordEvent, WordSequencer};

/// Notifications produced by `CharacterSequencer::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    PhaseChanged { phase: Phase, at: Duration },
    /// One logical pass finished (write, or write plus erase in reverse mode)
    PassComplete { at: Duration },
}
