//! Character sequencer
//!
//! Animates one fixed string: every non-blank position spins through random
//! glyphs and settles on its target character, positions cascading left to
//! right. In reverse mode the settled text is then erased right to left.
//!
//! The sequencer is time-explicit. Every operation takes `now` on the
//! sequencer's time line and `advance(now)` fires everything due up to then,
//! each event handled at its own due time. All pending work lives in one
//! owned `TimerQueue`, which is emptied before any new run is scheduled.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::options::{ResumeMode, SlotOptions};
use super::{Direction, SequencerEvent};
use crate::glyphs::{random_glyph, BLANK};
use crate::timer::TimerQueue;

/// Animation phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Writing,
    /// Waiting between passes
    Pausing,
    Erasing,
    Idle,
}

/// What a display position is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Blank,
    /// Random glyph, frame `iteration` of `of`
    Flicker { iteration: u32, of: u32 },
    Settled,
}

/// One position of the display buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub state: CellState,
}

impl Cell {
    pub const fn blank() -> Self {
        Self {
            glyph: BLANK,
            state: CellState::Blank,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.glyph == BLANK
    }

    /// Flicker progress in [0, 1]; settled cells are 1, blank cells 0
    pub fn progress(&self) -> f64 {
        match self.state {
            CellState::Blank => 0.0,
            CellState::Flicker { iteration, of } => {
                if of == 0 {
                    1.0
                } else {
                    (iteration + 1) as f64 / of as f64
                }
            }
            CellState::Settled => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Write,
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    /// Frame `iteration` of `of`; `of` is fixed when the pass is scheduled
    Flicker {
        index: usize,
        iteration: u32,
        of: u32,
        pass: Pass,
    },
    /// End of the pause after a write pass
    PauseElapsed,
    /// Start of the next write after a looping erase
    LoopRestart,
}

/// Scramble-then-settle animator for a single string
pub struct CharacterSequencer {
    target: Vec<char>,
    cells: Vec<Cell>,
    options: SlotOptions,
    phase: Phase,
    timers: TimerQueue<Tick>,
    /// Events pulled out of the queue by `pause`, with their remaining offsets
    suspended: Vec<(Duration, Tick)>,
    paused: bool,
    rng: StdRng,
    on_complete: Option<Box<dyn FnMut()>>,
    completed_passes: u64,
    outbox: Vec<SequencerEvent>,
}

impl fmt::Debug for CharacterSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterSequencer")
            .field("target", &self.target())
            .field("text", &self.text())
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("pending", &self.timers.len())
            .field("paused", &self.paused)
            .field("completed_passes", &self.completed_passes)
            .finish_non_exhaustive()
    }
}

impl CharacterSequencer {
    /// Create a sequencer seeded from OS entropy. Nothing runs until `start`.
    pub fn new(text: &str, options: SlotOptions) -> Self {
        Self::with_rng(text, options, StdRng::from_os_rng())
    }

    /// Create a sequencer with an explicit random source
    pub fn with_rng(text: &str, options: SlotOptions, rng: StdRng) -> Self {
        let target: Vec<char> = text.chars().collect();
        Self {
            cells: vec![Cell::blank(); target.len()],
            target,
            options: options.normalized(),
            phase: Phase::Idle,
            timers: TimerQueue::new(),
            suspended: Vec::new(),
            paused: false,
            rng,
            on_complete: None,
            completed_passes: 0,
            outbox: Vec::new(),
        }
    }

    pub fn with_seed(text: &str, options: SlotOptions, seed: u64) -> Self {
        Self::with_rng(text, options, StdRng::seed_from_u64(seed))
    }

    /// Register a callback invoked once per logical pass
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Start a fresh run at `now`, tearing down whatever was scheduled
    ///
    /// When paused, the buffer is reset but nothing is scheduled until `resume`.
    pub fn start(&mut self, now: Duration) {
        self.timers.cancel_all();
        self.suspended.clear();
        self.cells = vec![Cell::blank(); self.target.len()];

        if self.last_animated().is_none() {
            self.set_phase(Phase::Idle, now);
            return;
        }

        self.set_phase(Phase::Writing, now);
        if !self.paused {
            self.schedule_write(now);
        }
    }

    /// Explicit restart with the current text and options
    pub fn reset(&mut self, now: Duration) {
        self.start(now);
    }

    /// Replace the target text; restarts only if the text actually changed
    pub fn set_text(&mut self, text: &str, now: Duration) {
        if self.target.iter().copied().eq(text.chars()) {
            return;
        }
        self.restart_with(text, now);
    }

    /// Replace the target text and restart unconditionally
    pub fn restart_with(&mut self, text: &str, now: Duration) {
        self.target = text.chars().collect();
        self.start(now);
    }

    /// Replace the options; a change of loop flag or direction restarts the run
    pub fn set_options(&mut self, options: SlotOptions, now: Duration) {
        let options = options.normalized();
        let restart = self.options.needs_restart(&options);
        self.options = options;
        if restart {
            self.start(now);
        }
    }

    /// Cancel everything and go idle
    pub fn stop(&mut self) {
        self.timers.cancel_all();
        self.suspended.clear();
        self.phase = Phase::Idle;
    }

    /// Freeze the buffer: every pending event is canceled
    pub fn pause(&mut self, now: Duration) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.suspended = self
            .timers
            .drain()
            .into_iter()
            .map(|(due, tick)| (due.saturating_sub(now), tick))
            .collect();
        debug!(phase = ?self.phase, suspended = self.suspended.len(), "Sequencer paused");
    }

    /// Continue after `pause`
    pub fn resume(&mut self, now: Duration) {
        if !self.paused {
            return;
        }
        self.paused = false;
        let suspended = std::mem::take(&mut self.suspended);

        if self.options.resume == ResumeMode::Exact && !suspended.is_empty() {
            for (remaining, tick) in suspended {
                self.timers.schedule_at(now + remaining, tick);
            }
            debug!(phase = ?self.phase, pending = self.timers.len(), "Sequencer resumed in place");
            return;
        }

        match self.phase {
            Phase::Writing => self.schedule_write(now),
            Phase::Erasing => self.schedule_erase(now),
            Phase::Pausing => {
                // Re-arm the interrupted wait in full
                let gap = suspended
                    .iter()
                    .map(|(_, tick)| *tick)
                    .find(|tick| matches!(tick, Tick::PauseElapsed | Tick::LoopRestart))
                    .unwrap_or(Tick::PauseElapsed);
                let wait = match gap {
                    Tick::LoopRestart => self.options.loop_restart_delay(),
                    _ => self.options.pause_duration,
                };
                self.timers.schedule_at(now + wait, gap);
            }
            Phase::Idle => {}
        }
        debug!(phase = ?self.phase, pending = self.timers.len(), "Sequencer resumed");
    }

    /// Pointer entered the rendered text
    pub fn pointer_enter(&mut self, now: Duration) {
        if self.options.pause_on_hover {
            self.pause(now);
        }
    }

    /// Pointer left the rendered text
    pub fn pointer_leave(&mut self, now: Duration) {
        if self.options.pause_on_hover {
            self.resume(now);
        }
    }

    /// Fire every event due at or before `now`
    pub fn advance(&mut self, now: Duration) -> Vec<SequencerEvent> {
        while let Some(fired) = self.timers.pop_due(now) {
            self.handle(fired.event, fired.due);
        }
        std::mem::take(&mut self.outbox)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Current contents of the display buffer
    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.glyph).collect()
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> &SlotOptions {
        &self.options
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Number of events waiting in the queue
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the next pending event
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn completed_passes(&self) -> u64 {
        self.completed_passes
    }

    fn handle(&mut self, tick: Tick, at: Duration) {
        match tick {
            Tick::Flicker {
                index,
                iteration,
                of,
                pass,
            } => self.flicker(index, iteration, of, pass, at),
            Tick::PauseElapsed => {
                if self.options.direction == Direction::Reverse {
                    self.set_phase(Phase::Erasing, at);
                    self.schedule_erase(at);
                } else {
                    self.complete(at);
                    if self.options.looping {
                        self.set_phase(Phase::Writing, at);
                        self.schedule_write(at);
                    } else {
                        self.set_phase(Phase::Idle, at);
                    }
                }
            }
            Tick::LoopRestart => {
                self.set_phase(Phase::Writing, at);
                self.schedule_write(at);
            }
        }
    }

    fn flicker(&mut self, index: usize, iteration: u32, of: u32, pass: Pass, at: Duration) {
        let settles = iteration + 1 >= of;

        self.cells[index] = if !settles {
            Cell {
                glyph: random_glyph(&mut self.rng),
                state: CellState::Flicker { iteration, of },
            }
        } else {
            match pass {
                Pass::Write => Cell {
                    glyph: self.target[index],
                    state: CellState::Settled,
                },
                Pass::Erase => Cell::blank(),
            }
        };

        if !settles {
            return;
        }

        match pass {
            Pass::Write if Some(index) == self.last_animated() => {
                self.set_phase(Phase::Pausing, at);
                self.timers
                    .schedule_at(at + self.options.pause_duration, Tick::PauseElapsed);
            }
            Pass::Erase if Some(index) == self.first_animated() => {
                self.complete(at);
                if self.options.looping {
                    self.set_phase(Phase::Pausing, at);
                    self.timers
                        .schedule_at(at + self.options.loop_restart_delay(), Tick::LoopRestart);
                } else {
                    self.set_phase(Phase::Idle, at);
                }
            }
            _ => {}
        }
    }

    fn schedule_write(&mut self, at: Duration) {
        let iterations = self.options.iterations();
        for (index, &ch) in self.target.iter().enumerate() {
            if ch == BLANK {
                self.cells[index] = Cell::blank();
                continue;
            }
            let base = at + self.options.delay * index as u32;
            for iteration in 0..iterations {
                self.timers.schedule_at(
                    base + self.options.frame_offset(iteration),
                    Tick::Flicker {
                        index,
                        iteration,
                        of: iterations,
                        pass: Pass::Write,
                    },
                );
            }
        }
    }

    fn schedule_erase(&mut self, at: Duration) {
        let iterations = self.options.iterations();
        let last = self.target.len().saturating_sub(1);
        for index in (0..self.target.len()).rev() {
            if self.target[index] == BLANK {
                continue;
            }
            let base = at + self.options.delay * (last - index) as u32;
            for iteration in 0..iterations {
                self.timers.schedule_at(
                    base + self.options.frame_offset(iteration),
                    Tick::Flicker {
                        index,
                        iteration,
                        of: iterations,
                        pass: Pass::Erase,
                    },
                );
            }
        }
    }

    fn complete(&mut self, at: Duration) {
        self.completed_passes += 1;
        debug!(target_text = %self.target(), passes = self.completed_passes, "Pass complete");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        self.outbox.push(SequencerEvent::PassComplete { at });
    }

    fn set_phase(&mut self, phase: Phase, at: Duration) {
        if self.phase == phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, at_ms = at.as_millis() as u64, "Phase change");
        self.phase = phase;
        self.outbox.push(SequencerEvent::PhaseChanged { phase, at });
    }

    /// Rightmost position that gets scheduled; its last frame ends a write pass
    fn last_animated(&self) -> Option<usize> {
        self.target.iter().rposition(|&ch| ch != BLANK)
    }

    /// Leftmost position that gets scheduled; its last frame ends an erase pass
    fn first_animated(&self) -> Option<usize> {
        self.target.iter().position(|&ch| ch != BLANK)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::glyphs::SLOT_GLYPHS;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn once(direction: Direction) -> SlotOptions {
        SlotOptions {
            looping: false,
            direction,
            ..Default::default()
        }
    }

    /// Time at which the write pass of `text` settles, relative to its start
    fn write_span(text: &str, options: &SlotOptions) -> Duration {
        let last = text.chars().count() as u32 - 1;
        options.delay * last + options.frame_offset(options.iterations() - 1)
    }

    fn counter() -> (Rc<Counter<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Counter::new(0));
        let handle = count.clone();
        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn test_starts_blank() {
        let mut seq = CharacterSequencer::with_seed("hello", SlotOptions::default(), 1);
        seq.start(ms(0));
        assert_eq!(seq.text(), "     ");
        assert_eq!(seq.phase(), Phase::Writing);
        assert_eq!(seq.pending_timers(), 5 * 20);
    }

    #[test]
    fn test_write_settles_on_target() {
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("hello world", options, 2);
        seq.start(ms(0));

        let settle = write_span("hello world", &options);
        seq.advance(settle - ms(1));
        assert_ne!(seq.cells()[10].state, CellState::Settled);

        seq.advance(settle);
        assert_eq!(seq.text(), "hello world");
        assert_eq!(seq.phase(), Phase::Pausing);
        assert!(seq.cells().iter().all(|c| c.is_blank() || c.state == CellState::Settled));
    }

    #[test]
    fn test_first_frame_is_random_glyph() {
        let mut seq = CharacterSequencer::with_seed("ab", SlotOptions::default(), 3);
        seq.start(ms(0));
        seq.advance(ms(0));
        let first = seq.cells()[0];
        assert!(SLOT_GLYPHS.contains(first.glyph));
        assert_eq!(first.state, CellState::Flicker { iteration: 0, of: 20 });
        assert!(seq.cells()[1].is_blank());
    }

    #[test]
    fn test_forward_once_completes_after_pause() {
        let (count, callback) = counter();
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("hi", options, 4).on_complete(callback);
        seq.start(ms(0));

        let settle = write_span("hi", &options);
        seq.advance(settle + options.pause_duration - ms(1));
        assert_eq!(count.get(), 0);

        let events = seq.advance(settle + options.pause_duration);
        assert_eq!(count.get(), 1);
        assert!(events.contains(&SequencerEvent::PassComplete {
            at: settle + options.pause_duration
        }));
        assert_eq!(seq.phase(), Phase::Idle);
        assert_eq!(seq.pending_timers(), 0);

        seq.advance(ms(60_000));
        assert_eq!(count.get(), 1);
        assert_eq!(seq.text(), "hi");
    }

    #[test]
    fn test_forward_loop_rewrites() {
        let (count, callback) = counter();
        let options = SlotOptions::default();
        let mut seq = CharacterSequencer::with_seed("ab", options, 5).on_complete(callback);
        seq.start(ms(0));

        let cycle = write_span("ab", &options) + options.pause_duration;
        seq.advance(cycle);
        assert_eq!(count.get(), 1);
        assert_eq!(seq.phase(), Phase::Writing);
        assert_eq!(seq.pending_timers(), 2 * 20 - 1);

        // The first rewrite frame fires at the restart instant
        assert_eq!(seq.cells()[0].state, CellState::Flicker { iteration: 0, of: 20 });

        seq.advance(cycle * 2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_reverse_once_on_hi() {
        let (count, callback) = counter();
        let options = once(Direction::Reverse);
        let mut seq = CharacterSequencer::with_seed("hi", options, 6).on_complete(callback);
        seq.start(ms(0));

        let settle = write_span("hi", &options);
        seq.advance(settle);
        assert_eq!(seq.text(), "hi");
        assert_eq!(seq.phase(), Phase::Pausing);

        seq.advance(settle + options.pause_duration);
        assert_eq!(seq.phase(), Phase::Erasing);
        assert_eq!(count.get(), 0);

        // Erase runs right to left with the same span
        let erased = settle + options.pause_duration + write_span("hi", &options);
        seq.advance(erased - ms(1));
        assert_eq!(seq.cells()[1], Cell::blank());
        assert_ne!(seq.cells()[0], Cell::blank());

        seq.advance(erased);
        assert_eq!(seq.text(), "  ");
        assert_eq!(count.get(), 1);
        assert_eq!(seq.phase(), Phase::Idle);
        assert_eq!(seq.pending_timers(), 0);

        seq.advance(ms(60_000));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reverse_loop_restarts_after_five_delays() {
        let options = SlotOptions {
            direction: Direction::Reverse,
            ..Default::default()
        };
        let mut seq = CharacterSequencer::with_seed("hi", options, 7);
        seq.start(ms(0));

        let span = write_span("hi", &options);
        let erased = span + options.pause_duration + span;
        let events = seq.advance(erased);
        assert!(events.iter().any(|e| matches!(e, SequencerEvent::PassComplete { .. })));
        assert_eq!(seq.phase(), Phase::Pausing);

        seq.advance(erased + options.loop_restart_delay() - ms(1));
        assert_eq!(seq.phase(), Phase::Pausing);
        seq.advance(erased + options.loop_restart_delay());
        assert_eq!(seq.phase(), Phase::Writing);
    }

    #[test]
    fn test_blank_positions_are_never_scheduled() {
        let mut seq = CharacterSequencer::with_seed("a b", SlotOptions::default(), 8);
        seq.start(ms(0));
        assert_eq!(seq.pending_timers(), 2 * 20);
    }

    #[test]
    fn test_trailing_blank_still_completes() {
        let (count, callback) = counter();
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("ok  ", options, 9).on_complete(callback);
        seq.start(ms(0));
        seq.advance(ms(60_000));
        assert_eq!(seq.text(), "ok  ");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_empty_and_blank_text_idle() {
        let mut seq = CharacterSequencer::with_seed("", SlotOptions::default(), 10);
        seq.start(ms(0));
        assert!(seq.is_empty());
        assert_eq!(seq.phase(), Phase::Idle);
        assert_eq!(seq.pending_timers(), 0);

        let mut seq = CharacterSequencer::with_seed("   ", SlotOptions::default(), 10);
        seq.start(ms(0));
        assert_eq!(seq.text(), "   ");
        assert_eq!(seq.phase(), Phase::Idle);
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn test_stop_prevents_mutation() {
        let mut seq = CharacterSequencer::with_seed("frozen", SlotOptions::default(), 11);
        seq.start(ms(0));
        seq.advance(ms(320));
        let snapshot = seq.text();

        seq.stop();
        assert_eq!(seq.pending_timers(), 0);
        let events = seq.advance(ms(60_000));
        assert!(events.is_empty());
        assert_eq!(seq.text(), snapshot);
        assert_eq!(seq.phase(), Phase::Idle);
    }

    #[test]
    fn test_set_text_tears_down_previous_run() {
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("first", options, 12);
        seq.start(ms(0));
        seq.advance(ms(500));

        seq.set_text("xy", ms(500));
        assert_eq!(seq.text(), "  ");
        assert_eq!(seq.pending_timers(), 2 * 20);

        seq.advance(ms(500) + write_span("xy", &options));
        assert_eq!(seq.text(), "xy");
    }

    #[test]
    fn test_set_text_same_text_is_noop() {
        let mut seq = CharacterSequencer::with_seed("same", SlotOptions::default(), 13);
        seq.start(ms(0));
        seq.advance(ms(2_000));
        let before = seq.text();
        seq.set_text("same", ms(2_000));
        assert_eq!(seq.text(), before);
    }

    #[test]
    fn test_set_options_restarts_on_direction_change() {
        let mut seq = CharacterSequencer::with_seed("abc", once(Direction::Forward), 14);
        seq.start(ms(0));
        seq.advance(ms(3_000));
        assert_eq!(seq.text(), "abc");

        let slower = SlotOptions {
            duration: ms(2_000),
            ..*seq.options()
        };
        seq.set_options(slower, ms(3_000));
        assert_eq!(seq.text(), "abc");

        let reversed = SlotOptions {
            direction: Direction::Reverse,
            ..slower
        };
        seq.set_options(reversed, ms(3_000));
        assert_eq!(seq.text(), "   ");
        assert_eq!(seq.phase(), Phase::Writing);
    }

    #[test]
    fn test_duration_change_mid_write_completes_once() {
        for new_duration in [ms(2_000), ms(500)] {
            let (count, callback) = counter();
            let mut seq =
                CharacterSequencer::with_seed("ab", once(Direction::Forward), 21).on_complete(callback);
            seq.start(ms(0));
            seq.advance(ms(100));

            let changed = SlotOptions {
                duration: new_duration,
                ..*seq.options()
            };
            seq.set_options(changed, ms(100));
            assert_eq!(seq.phase(), Phase::Writing);

            seq.advance(ms(600_000));
            assert_eq!(seq.text(), "ab", "duration {:?}", new_duration);
            assert_eq!(count.get(), 1, "duration {:?}", new_duration);
            assert_eq!(seq.phase(), Phase::Idle);
            assert_eq!(seq.pending_timers(), 0);
        }
    }

    #[test]
    fn test_duration_change_applies_to_next_pass() {
        let mut seq = CharacterSequencer::with_seed("a", SlotOptions::default(), 22);
        seq.start(ms(0));
        seq.advance(ms(10));
        let faster = SlotOptions {
            duration: ms(200),
            ..*seq.options()
        };
        seq.set_options(faster, ms(10));

        // First pass still runs its 20 frames, the rewrite after the pause uses 4
        let rewrite = write_span("a", &SlotOptions::default()) + seq.options().pause_duration;
        seq.advance(rewrite);
        assert_eq!(seq.phase(), Phase::Writing);
        assert_eq!(seq.pending_timers(), 3);
    }

    #[test]
    fn test_pause_cancels_and_restart_phase_resume() {
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("abcd", options, 15);
        seq.start(ms(0));
        seq.advance(ms(400));
        assert!(seq.pending_timers() > 0);

        seq.pause(ms(400));
        assert!(seq.is_paused());
        assert_eq!(seq.pending_timers(), 0);
        let frozen = seq.text();
        assert!(seq.advance(ms(10_000)).is_empty());
        assert_eq!(seq.text(), frozen);

        // Resume reruns the whole write phase from the resume instant
        seq.resume(ms(10_000));
        assert_eq!(seq.pending_timers(), 4 * 20);
        seq.advance(ms(10_000) + write_span("abcd", &options));
        assert_eq!(seq.text(), "abcd");
    }

    #[test]
    fn test_exact_resume_keeps_offsets() {
        let options = SlotOptions {
            looping: false,
            resume: ResumeMode::Exact,
            ..Default::default()
        };
        let mut seq = CharacterSequencer::with_seed("abcd", options, 16);
        seq.start(ms(0));
        seq.advance(ms(400));
        let remaining = seq.pending_timers();

        seq.pause(ms(400));
        seq.resume(ms(1_400));
        assert_eq!(seq.pending_timers(), remaining);

        seq.advance(ms(1_000) + write_span("abcd", &options) - ms(1));
        assert_ne!(seq.cells()[3].state, CellState::Settled);
        seq.advance(ms(1_000) + write_span("abcd", &options));
        assert_eq!(seq.text(), "abcd");
    }

    #[test]
    fn test_pause_during_pausing_rearms_wait() {
        let (count, callback) = counter();
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("ab", options, 17).on_complete(callback);
        seq.start(ms(0));
        let settle = write_span("ab", &options);
        seq.advance(settle);
        assert_eq!(seq.phase(), Phase::Pausing);

        seq.pause(settle + ms(500));
        seq.resume(ms(5_000));
        seq.advance(ms(5_000) + options.pause_duration - ms(1));
        assert_eq!(count.get(), 0);
        seq.advance(ms(5_000) + options.pause_duration);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_hover_only_when_enabled() {
        let mut seq = CharacterSequencer::with_seed("ab", SlotOptions::default(), 18);
        seq.start(ms(0));
        seq.pointer_enter(ms(10));
        assert!(!seq.is_paused());

        let options = SlotOptions {
            pause_on_hover: true,
            ..Default::default()
        };
        let mut seq = CharacterSequencer::with_seed("ab", options, 18);
        seq.start(ms(0));
        seq.pointer_enter(ms(10));
        assert!(seq.is_paused());
        assert_eq!(seq.pending_timers(), 0);
        seq.pointer_leave(ms(20));
        assert!(!seq.is_paused());
        assert_eq!(seq.pending_timers(), 2 * 20);
    }

    #[test]
    fn test_start_while_paused_waits_for_resume() {
        let mut seq = CharacterSequencer::with_seed("ab", SlotOptions::default(), 19);
        seq.start(ms(0));
        seq.pause(ms(0));
        seq.reset(ms(100));
        assert_eq!(seq.pending_timers(), 0);
        assert_eq!(seq.phase(), Phase::Writing);
        seq.resume(ms(200));
        assert_eq!(seq.pending_timers(), 2 * 20);
    }

    #[test]
    fn test_restart_reaches_same_final_state() {
        let options = once(Direction::Forward);
        let mut seq = CharacterSequencer::with_seed("again", options, 20);
        seq.start(ms(0));
        seq.advance(ms(10_000));
        assert_eq!(seq.text(), "again");

        seq.reset(ms(10_000));
        assert_eq!(seq.text(), "     ");
        seq.advance(ms(20_000));
        assert_eq!(seq.text(), "again");
    }

    #[test]
    fn test_sub_frame_duration_settles_directly() {
        let options = SlotOptions {
            duration: ms(10),
            looping: false,
            ..Default::default()
        };
        let mut seq = CharacterSequencer::with_seed("go", options, 21);
        seq.start(ms(0));
        seq.advance(ms(0));
        assert_eq!(seq.cells()[0].glyph, 'g');
        seq.advance(ms(100));
        assert_eq!(seq.text(), "go");
    }

    proptest! {
        #[test]
        fn prop_blanks_never_scrambled(text in "[a-c ]{1,12}", seed in any::<u64>()) {
            let options = SlotOptions {
                duration: ms(200),
                delay: ms(30),
                direction: Direction::Reverse,
                ..Default::default()
            };
            let mut seq = CharacterSequencer::with_seed(&text, options, seed);
            seq.start(ms(0));
            let blanks: Vec<usize> = text
                .chars()
                .enumerate()
                .filter(|(_, ch)| *ch == ' ')
                .map(|(i, _)| i)
                .collect();
            for step in 0..200u64 {
                seq.advance(ms(step * 25));
                for &i in &blanks {
                    prop_assert_eq!(seq.cells()[i], Cell::blank());
                }
            }
        }

        #[test]
        fn prop_write_converges(text in "[a-z]{1,8}( [a-z]{1,8})?", seed in any::<u64>()) {
            let options = SlotOptions {
                looping: false,
                ..Default::default()
            };
            let mut seq = CharacterSequencer::with_seed(&text, options, seed);
            seq.start(ms(0));
            seq.advance(write_span(&text, &options));
            prop_assert_eq!(seq.text(), text);
        }
    }
}
