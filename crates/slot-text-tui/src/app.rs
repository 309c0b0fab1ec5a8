use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::Style,
    widgets::Block,
    Frame,
};
use tracing::{debug, trace};

use slot_text_core::sequencer::{Direction, Phase, SlotOptions};
use slot_text_core::{CharacterSequencer, Clock, EasingType, SystemClock, WordSequencer};

use crate::hover::{HoverChange, HoverTracker};
use crate::input::Action;
use crate::theme::Theme;
use crate::widgets::{SlotTextWidget, SlotWordsWidget, StatusBarWidget};

/// The sequencer driven by the terminal app
pub enum Animator {
    Chars(CharacterSequencer),
    Words(WordSequencer),
}

impl Animator {
    pub fn start(&mut self, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.start(now),
            Animator::Words(seq) => seq.start(now),
        }
    }

    pub fn reset(&mut self, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.reset(now),
            Animator::Words(seq) => seq.reset(now),
        }
    }

    /// Fire due events; returns how many were reported
    pub fn advance(&mut self, now: Duration) -> usize {
        match self {
            Animator::Chars(seq) => {
                let events = seq.advance(now);
                for event in &events {
                    trace!(?event, "Sequencer event");
                }
                events.len()
            }
            Animator::Words(seq) => {
                let events = seq.advance(now);
                for event in &events {
                    trace!(?event, "Word event");
                }
                events.len()
            }
        }
    }

    pub fn pause(&mut self, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.pause(now),
            Animator::Words(seq) => seq.pause(now),
        }
    }

    pub fn resume(&mut self, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.resume(now),
            Animator::Words(seq) => seq.resume(now),
        }
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.pointer_enter(now),
            Animator::Words(seq) => seq.pointer_enter(now),
        }
    }

    pub fn pointer_leave(&mut self, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.pointer_leave(now),
            Animator::Words(seq) => seq.pointer_leave(now),
        }
    }

    pub fn set_options(&mut self, options: SlotOptions, now: Duration) {
        match self {
            Animator::Chars(seq) => seq.set_options(options, now),
            Animator::Words(seq) => seq.set_options(options, now),
        }
    }

    pub fn options(&self) -> &SlotOptions {
        match self {
            Animator::Chars(seq) => seq.options(),
            Animator::Words(seq) => seq.options(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Animator::Chars(seq) => seq.phase(),
            Animator::Words(seq) => seq.chars().phase(),
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            Animator::Chars(seq) => seq.is_paused(),
            Animator::Words(seq) => seq.is_paused(),
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        match self {
            Animator::Chars(seq) => seq.next_due(),
            Animator::Words(seq) => seq.next_due(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Animator::Chars(seq) => seq.text(),
            Animator::Words(seq) => seq.text(),
        }
    }

    /// Widget for the current frame; `None` when there is nothing to draw
    pub fn widget<'a>(&'a self, theme: &'a Theme) -> Option<SlotTextWidget<'a>> {
        match self {
            Animator::Chars(seq) => Some(SlotTextWidget::chars(seq, theme)),
            Animator::Words(seq) => SlotWordsWidget::new(seq, theme).into_inner(),
        }
    }
}

/// Application state
pub struct App<C: Clock = SystemClock> {
    pub animator: Animator,
    pub theme: Theme,
    pub hover: HoverTracker,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Pause requested from the keyboard; hover never lifts it
    user_paused: bool,
    clock: C,
}

impl<C: Clock> App<C> {
    pub fn new(animator: Animator, clock: C, theme: Theme) -> Self {
        Self {
            animator,
            theme,
            hover: HoverTracker::new(),
            status_message: None,
            should_quit: false,
            user_paused: false,
            clock,
        }
    }

    /// Paused from the keyboard, as opposed to by hovering
    pub fn is_user_paused(&self) -> bool {
        self.user_paused
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn start(&mut self) {
        let now = self.now();
        self.animator.start(now);
    }

    /// Catch the animation up with the clock
    pub fn tick(&mut self) -> usize {
        let now = self.now();
        self.animator.advance(now)
    }

    /// How long the host loop may sleep before the next scheduled event
    pub fn until_next_event(&self, cap: Duration) -> Duration {
        let now = self.now();
        match self.animator.next_due() {
            Some(due) => due.saturating_sub(now).min(cap),
            None => cap,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let now = self.now();
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => {
                if self.user_paused {
                    self.user_paused = false;
                    // A pointer still over the text keeps the hover pause
                    if !(self.hover.is_inside() && self.animator.options().pause_on_hover) {
                        self.animator.resume(now);
                    }
                    self.status_message = None;
                } else {
                    self.user_paused = true;
                    self.animator.pause(now);
                    self.status_message = Some("Paused".to_string());
                }
            }
            Action::Restart => {
                self.animator.reset(now);
                self.status_message = None;
            }
            Action::CycleEasing => {
                let mut options = *self.animator.options();
                options.easing = next_easing(options.easing);
                self.animator.set_options(options, now);
                self.status_message = Some(format!("Easing: {}", options.easing));
            }
            Action::ToggleDirection => {
                let mut options = *self.animator.options();
                options.direction = match options.direction {
                    Direction::Forward => Direction::Reverse,
                    Direction::Reverse => Direction::Forward,
                };
                self.animator.set_options(options, now);
                self.status_message = Some(format!("Direction: {}", options.direction));
            }
            Action::None => {}
        }
        debug!(?action, "Handled action");
    }

    /// Pointer moved to a terminal cell
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let change = self.hover.pointer_moved(column, row);
        self.apply_hover(change);
    }

    /// Pointer left the terminal
    pub fn pointer_left(&mut self) {
        let change = self.hover.pointer_left();
        self.apply_hover(change);
    }

    fn apply_hover(&mut self, change: Option<HoverChange>) {
        let now = self.now();
        match change {
            Some(HoverChange::Enter) => self.animator.pointer_enter(now),
            Some(HoverChange::Leave) if !self.user_paused => self.animator.pointer_leave(now),
            Some(HoverChange::Leave) | None => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        let background = Style::default().bg(self.theme.bg);
        frame.render_widget(Block::default().style(background), layout[0]);

        let region = match self.animator.widget(&self.theme) {
            Some(widget) => {
                let region = widget.text_area(layout[0]);
                frame.render_widget(widget, layout[0]);
                region
            }
            None => Default::default(),
        };
        StatusBarWidget::render(frame, layout[1], self);

        let change = self.hover.set_region(region);
        self.apply_hover(change);
    }
}

fn next_easing(current: EasingType) -> EasingType {
    let index = EasingType::ALL
        .iter()
        .position(|&easing| easing == current)
        .unwrap_or(0);
    EasingType::ALL[(index + 1) % EasingType::ALL.len()]
}
