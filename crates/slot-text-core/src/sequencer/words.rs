//! Word sequencer
//!
//! Plays a list of strings one after another through a single non-looping
//! `CharacterSequencer`. When a word's pass completes the sequencer waits
//! `pause_duration`, then moves the cursor on; after the last word the list
//! pass completes and, when looping, starts over from the first word.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use super::chars::CharacterSequencer;
use super::options::{ResumeMode, SlotOptions, WordOrder};
use super::SequencerEvent;
use crate::timer::TimerQueue;

/// Notifications produced by `WordSequencer::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordEvent {
    /// The word at `index` of the queue started writing
    WordStarted { index: usize, at: Duration },
    /// Forwarded from the active character sequencer
    Char(SequencerEvent),
    /// Every word in the queue has been played once
    ListComplete { at: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AdvanceWord;

/// Cycles a character sequencer through a list of words
pub struct WordSequencer {
    words: Vec<String>,
    order: WordOrder,
    options: SlotOptions,
    queue: Vec<String>,
    cursor: usize,
    chars: CharacterSequencer,
    timers: TimerQueue<AdvanceWord>,
    /// Remaining wait of an advance interrupted by `pause`
    suspended_advance: Option<Duration>,
    paused: bool,
    rng: StdRng,
    on_complete: Option<Box<dyn FnMut()>>,
    completed_lists: u64,
    outbox: Vec<WordEvent>,
}

impl fmt::Debug for WordSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordSequencer")
            .field("queue", &self.queue)
            .field("cursor", &self.cursor)
            .field("order", &self.order)
            .field("options", &self.options)
            .field("paused", &self.paused)
            .field("chars", &self.chars)
            .finish_non_exhaustive()
    }
}

impl WordSequencer {
    /// Create a word sequencer seeded from OS entropy. Nothing runs until `start`.
    pub fn new(words: Vec<String>, order: WordOrder, options: SlotOptions) -> Self {
        Self::with_rng(words, order, options, StdRng::from_os_rng())
    }

    pub fn with_seed(words: Vec<String>, order: WordOrder, options: SlotOptions, seed: u64) -> Self {
        Self::with_rng(words, order, options, StdRng::seed_from_u64(seed))
    }

    /// Create a word sequencer with an explicit random source
    ///
    /// The queue is built (and shuffled, for random order) here, once.
    pub fn with_rng(
        words: Vec<String>,
        order: WordOrder,
        options: SlotOptions,
        mut rng: StdRng,
    ) -> Self {
        let options = options.normalized();
        let chars_rng = StdRng::seed_from_u64(rng.next_u64());
        let queue = build_queue(&words, order, &mut rng);
        let first = queue.first().map(String::as_str).unwrap_or_default();
        let chars = CharacterSequencer::with_rng(first, chars_options(&options), chars_rng);

        Self {
            words,
            order,
            options,
            queue,
            cursor: 0,
            chars,
            timers: TimerQueue::new(),
            suspended_advance: None,
            paused: false,
            rng,
            on_complete: None,
            completed_lists: 0,
            outbox: Vec::new(),
        }
    }

    /// Register a callback invoked once per full pass through the list
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Start from the first word of the queue
    pub fn start(&mut self, now: Duration) {
        self.timers.cancel_all();
        self.suspended_advance = None;
        self.cursor = 0;
        if self.queue.is_empty() {
            self.chars.stop();
            return;
        }
        self.play_current(now);
    }

    pub fn reset(&mut self, now: Duration) {
        self.start(now);
    }

    /// Replace the word list; the queue is rebuilt only if the list changed
    pub fn set_words(&mut self, words: Vec<String>, now: Duration) {
        if words == self.words {
            return;
        }
        self.queue = build_queue(&words, self.order, &mut self.rng);
        self.words = words;
        self.start(now);
    }

    /// Replace the options of both this sequencer and the active word
    pub fn set_options(&mut self, options: SlotOptions, now: Duration) {
        let options = options.normalized();
        let restart = self.options.needs_restart(&options);
        self.options = options;
        self.chars.set_options(chars_options(&options), now);
        if restart {
            self.start(now);
        }
    }

    /// Cancel everything, the active word included
    pub fn stop(&mut self) {
        self.timers.cancel_all();
        self.suspended_advance = None;
        self.chars.stop();
    }

    /// Freeze the active word and suspend a pending advance
    pub fn pause(&mut self, now: Duration) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.suspended_advance = self
            .timers
            .drain()
            .into_iter()
            .next()
            .map(|(due, _)| due.saturating_sub(now));
        self.chars.pause(now);
        debug!(cursor = self.cursor, "Word sequencer paused");
    }

    pub fn resume(&mut self, now: Duration) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.chars.resume(now);
        if let Some(remaining) = self.suspended_advance.take() {
            let wait = match self.options.resume {
                ResumeMode::Exact => remaining,
                ResumeMode::RestartPhase => self.options.pause_duration,
            };
            self.timers.schedule_at(now + wait, AdvanceWord);
        }
        debug!(cursor = self.cursor, "Word sequencer resumed");
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        if self.options.pause_on_hover {
            self.pause(now);
        }
    }

    pub fn pointer_leave(&mut self, now: Duration) {
        if self.options.pause_on_hover {
            self.resume(now);
        }
    }

    /// Fire every event due at or before `now`, word advances included
    pub fn advance(&mut self, now: Duration) -> Vec<WordEvent> {
        loop {
            // Never let the active word run past a pending advance
            let horizon = match self.timers.next_due() {
                Some(due) if due < now => due,
                _ => now,
            };

            for event in self.chars.advance(horizon) {
                if let SequencerEvent::PassComplete { at } = event {
                    self.word_complete(at);
                }
                self.outbox.push(WordEvent::Char(event));
            }

            if let Some(fired) = self.timers.pop_due(horizon) {
                self.next_word(fired.due);
                continue;
            }
            if horizon >= now {
                break;
            }
        }
        std::mem::take(&mut self.outbox)
    }

    /// Word currently handed to the character sequencer
    pub fn current_word(&self) -> Option<&str> {
        self.queue.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Words in play order
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// The active character sequencer
    pub fn chars(&self) -> &CharacterSequencer {
        &self.chars
    }

    pub fn options(&self) -> &SlotOptions {
        &self.options
    }

    pub fn order(&self) -> WordOrder {
        self.order
    }

    /// Current contents of the active word's display buffer
    pub fn text(&self) -> String {
        self.chars.text()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pending events of both this sequencer and the active word
    pub fn pending_timers(&self) -> usize {
        self.timers.len() + self.chars.pending_timers()
    }

    /// Earliest pending due time across the word queue and the active word
    pub fn next_due(&self) -> Option<Duration> {
        match (self.timers.next_due(), self.chars.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn completed_lists(&self) -> u64 {
        self.completed_lists
    }

    fn word_complete(&mut self, at: Duration) {
        if self.paused {
            return;
        }
        self.timers
            .schedule_at(at + self.options.pause_duration, AdvanceWord);
    }

    fn next_word(&mut self, at: Duration) {
        if self.cursor + 1 < self.queue.len() {
            self.cursor += 1;
            self.play_current(at);
            return;
        }

        self.completed_lists += 1;
        debug!(words = self.queue.len(), lists = self.completed_lists, "Word list complete");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        self.outbox.push(WordEvent::ListComplete { at });

        if self.options.looping {
            self.cursor = 0;
            self.play_current(at);
        }
    }

    fn play_current(&mut self, at: Duration) {
        let Some(word) = self.queue.get(self.cursor) else {
            return;
        };
        debug!(index = self.cursor, word = %word, "Starting word");
        self.chars.restart_with(word, at);
        self.outbox.push(WordEvent::WordStarted {
            index: self.cursor,
            at,
        });
    }
}

/// Options for the active word: the list loops, a single word never does
fn chars_options(options: &SlotOptions) -> SlotOptions {
    SlotOptions {
        looping: false,
        ..*options
    }
}

/// Play order of `words`; blank words are dropped since they have nothing to animate
fn build_queue(words: &[String], order: WordOrder, rng: &mut StdRng) -> Vec<String> {
    let mut queue: Vec<String> = words
        .iter()
        .filter(|word| !word.trim().is_empty())
        .cloned()
        .collect();
    if order == WordOrder::Random {
        queue.shuffle(rng);
    }
    queue
}
