use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::EasingType;
use crate::error::Error;

/// Time covered by one flicker frame
pub const FRAME: Duration = Duration::from_millis(50);

/// After an erase pass, a looping run waits this many stagger delays before writing again
pub const LOOP_RESTART_DELAYS: u32 = 5;

/// Which way a run goes after the text has been written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Write, pause, complete
    #[default]
    Forward,
    /// Write, pause, erase right to left, complete
    Reverse,
}

/// How the word list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordOrder {
    #[default]
    Sequential,
    /// Shuffled once when the queue is built
    Random,
}

/// What `resume` does after a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumeMode {
    /// Rerun the whole schedule of the interrupted phase
    #[default]
    RestartPhase,
    /// Continue every suspended event with its remaining offset
    Exact,
}

macro_rules! impl_option_str {
    ($ty:ty, $what:literal, { $($name:literal => $variant:path),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(Error::InvalidOption(format!(
                        concat!("unknown ", $what, " '{}'"),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $($variant => $name,)+
                };
                f.write_str(name)
            }
        }
    };
}

impl_option_str!(Direction, "direction", {
    "forward" => Direction::Forward,
    "reverse" => Direction::Reverse,
});

impl_option_str!(WordOrder, "order", {
    "sequential" => WordOrder::Sequential,
    "random" => WordOrder::Random,
});

impl_option_str!(ResumeMode, "resume mode", {
    "restart-phase" => ResumeMode::RestartPhase,
    "exact" => ResumeMode::Exact,
});

/// Parameters of a scramble run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotOptions {
    /// Length of one position's flicker run
    pub duration: Duration,
    /// Stagger between neighbouring positions
    pub delay: Duration,
    pub looping: bool,
    pub direction: Direction,
    /// Wait between write and erase, or between passes
    pub pause_duration: Duration,
    pub easing: EasingType,
    pub pause_on_hover: bool,
    pub resume: ResumeMode,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            delay: Duration::from_millis(100),
            looping: true,
            direction: Direction::Forward,
            pause_duration: Duration::from_millis(1000),
            easing: EasingType::Smooth,
            pause_on_hover: false,
            resume: ResumeMode::RestartPhase,
        }
    }
}

impl SlotOptions {
    /// Defaults used by the word animator
    pub fn for_words() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            ..Self::default()
        }
    }

    /// Flicker frames per position, the last of which settles
    pub fn iterations(&self) -> u32 {
        let frames = self.duration.as_millis() / FRAME.as_millis();
        frames.clamp(1, u32::MAX as u128) as u32
    }

    /// Offset of flicker frame `iteration` from the start of its position
    #[inline]
    pub fn frame_offset(&self, iteration: u32) -> Duration {
        self.duration * iteration / self.iterations()
    }

    /// Wait before a looping reverse run starts writing again
    #[inline]
    pub fn loop_restart_delay(&self) -> Duration {
        self.delay * LOOP_RESTART_DELAYS
    }

    /// Guard against loops that would restart at the same instant forever
    pub fn normalized(mut self) -> Self {
        let instant_pass = self.iterations() <= 1 && self.delay.is_zero();
        if self.looping && instant_pass && self.pause_duration.is_zero() {
            tracing::debug!("Looping run has no duration, raising pause to one frame");
            self.pause_duration = FRAME;
        }
        self
    }

    /// Whether switching to `other` requires tearing the run down
    pub(crate) fn needs_restart(&self, other: &SlotOptions) -> bool {
        self.looping != other.looping || self.direction != other.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SlotOptions::default();
        assert_eq!(options.duration, Duration::from_millis(1000));
        assert_eq!(options.delay, Duration::from_millis(100));
        assert!(options.looping);
        assert_eq!(options.direction, Direction::Forward);
        assert_eq!(options.pause_duration, Duration::from_millis(1000));
        assert_eq!(options.easing, EasingType::Smooth);
        assert!(!options.pause_on_hover);
        assert_eq!(SlotOptions::for_words().duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_iterations() {
        let mut options = SlotOptions::default();
        assert_eq!(options.iterations(), 20);
        options.duration = Duration::from_millis(1030);
        assert_eq!(options.iterations(), 20);
        options.duration = Duration::from_millis(20);
        assert_eq!(options.iterations(), 1);
    }

    #[test]
    fn test_frame_offsets_are_exact() {
        let options = SlotOptions {
            duration: Duration::from_millis(1030),
            ..Default::default()
        };
        assert_eq!(options.frame_offset(0), Duration::ZERO);
        assert_eq!(options.frame_offset(10), Duration::from_millis(515));
        assert_eq!(options.frame_offset(19), Duration::from_micros(978_500));
    }

    #[test]
    fn test_normalized_breaks_instant_loops() {
        let options = SlotOptions {
            duration: Duration::from_millis(10),
            delay: Duration::ZERO,
            pause_duration: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(options.normalized().pause_duration, FRAME);

        let once = SlotOptions { looping: false, ..options };
        assert_eq!(once.normalized().pause_duration, Duration::ZERO);
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("reverse".parse::<Direction>().unwrap(), Direction::Reverse);
        assert_eq!("Random".parse::<WordOrder>().unwrap(), WordOrder::Random);
        assert_eq!("exact".parse::<ResumeMode>().unwrap(), ResumeMode::Exact);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(Error::InvalidOption(_))
        ));
        assert_eq!(ResumeMode::RestartPhase.to_string(), "restart-phase");
    }
}
