use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use slot_text_core::{Clock, Phase};

use crate::app::{Animator, App};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
        let hint = " q:quit space:pause r:restart e:easing d:direction ";
        let line = Self::line(app, area.width, hint);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn line<C: Clock>(app: &App<C>, width: u16, hint: &'static str) -> Line<'static> {
        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => Self::summary(app),
        };

        let padding_len = (width as usize)
            .saturating_sub(status_text.chars().count() + hint.len());

        Line::from(vec![
            Span::styled(status_text, app.theme.status_style()),
            Span::styled(" ".repeat(padding_len), app.theme.status_style()),
            Span::styled(hint, app.theme.hint_style()),
        ])
    }

    fn summary<C: Clock>(app: &App<C>) -> String {
        let animator = &app.animator;
        let phase = match animator.phase() {
            Phase::Writing => "WRITING",
            Phase::Pausing => "PAUSING",
            Phase::Erasing => "ERASING",
            Phase::Idle => "IDLE",
        };
        let state = if animator.is_paused() { " [paused]" } else { "" };
        let options = animator.options();

        let position = match animator {
            Animator::Chars(_) => String::new(),
            Animator::Words(seq) if seq.is_empty() => " | no words".to_string(),
            Animator::Words(seq) => {
                format!(" | word {}/{}", seq.cursor() + 1, seq.queue().len())
            }
        };

        format!(
            " {}{}{} | {} | {}",
            phase, state, position, options.easing, options.direction
        )
    }
}
