use std::time::Duration;

use clap::Args;

use slot_text_core::sequencer::{Direction, ResumeMode, SlotOptions, WordOrder};
use slot_text_core::{AppConfig, CharacterSequencer, EasingType, WordSequencer};
use slot_text_tui::Animator;

/// Animation flags shared by every subcommand; unset flags fall back to the config file
#[derive(Args, Debug, Default, Clone)]
pub struct AnimationArgs {
    /// Flicker run per character in milliseconds
    #[arg(long, value_name = "MS")]
    pub duration: Option<u64>,

    /// Stagger between neighbouring characters in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Play once instead of looping
    #[arg(long)]
    pub no_loop: bool,

    /// forward or reverse
    #[arg(long)]
    pub direction: Option<Direction>,

    /// bounce, elastic, smooth, sharp or linear
    #[arg(long)]
    pub easing: Option<String>,

    /// Freeze while the pointer is over the text
    #[arg(long)]
    pub pause_on_hover: bool,

    /// Hold between phases in milliseconds
    #[arg(long, value_name = "MS")]
    pub pause_duration: Option<u64>,

    /// restart-phase or exact
    #[arg(long)]
    pub resume: Option<ResumeMode>,

    /// Seed for the glyph and shuffle randomness
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AnimationArgs {
    /// Layer the flags over `base`
    pub fn apply(&self, base: SlotOptions) -> SlotOptions {
        let mut options = base;
        if let Some(ms) = self.duration {
            options.duration = Duration::from_millis(ms);
        }
        if let Some(ms) = self.delay {
            options.delay = Duration::from_millis(ms);
        }
        if self.no_loop {
            options.looping = false;
        }
        if let Some(direction) = self.direction {
            options.direction = direction;
        }
        if let Some(name) = &self.easing {
            options.easing = EasingType::from_name(name);
        }
        if self.pause_on_hover {
            options.pause_on_hover = true;
        }
        if let Some(ms) = self.pause_duration {
            options.pause_duration = Duration::from_millis(ms);
        }
        if let Some(resume) = self.resume {
            options.resume = resume;
        }
        options
    }
}

/// What to animate in the headless subcommands
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Animate this text character by character
    #[arg(long, conflicts_with = "words")]
    pub text: Option<String>,

    /// Cycle through these words (defaults to the configured list)
    #[arg(long, num_args = 1..)]
    pub words: Vec<String>,

    /// sequential or random
    #[arg(long)]
    pub order: Option<WordOrder>,
}

/// Text or word list to animate, resolved against the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Chars(String),
    Words(Vec<String>, WordOrder),
}

impl Source {
    pub fn resolve(args: &SourceArgs, config: &AppConfig) -> Self {
        if let Some(text) = &args.text {
            return Source::Chars(text.clone());
        }
        let words = if args.words.is_empty() {
            config.words.words.clone()
        } else {
            args.words.clone()
        };
        Source::Words(words, args.order.unwrap_or(config.words.order))
    }

    /// Build the sequencer with config defaults overridden by `anim`
    pub fn animator(self, anim: &AnimationArgs, config: &AppConfig) -> Animator {
        let seed = anim.seed.or(config.animation.seed);
        match self {
            Source::Chars(text) => {
                let options = anim.apply(config.animation.slot_options());
                let seq = match seed {
                    Some(seed) => CharacterSequencer::with_seed(&text, options, seed),
                    None => CharacterSequencer::new(&text, options),
                };
                Animator::Chars(seq)
            }
            Source::Words(words, order) => {
                let options = anim.apply(config.word_options());
                let seq = match seed {
                    Some(seed) => WordSequencer::with_seed(words, order, options, seed),
                    None => WordSequencer::new(words, order, options),
                };
                Animator::Words(seq)
            }
        }
    }
}
