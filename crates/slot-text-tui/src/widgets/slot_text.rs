use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use slot_text_core::sequencer::{Cell, CharacterSequencer, WordSequencer};
use slot_text_core::EasingType;

use crate::theme::Theme;

/// Renders a sequencer frame on one terminal row, one styled span per position
pub struct SlotTextWidget<'a> {
    cells: &'a [Cell],
    easing: EasingType,
    theme: &'a Theme,
    block: Option<Block<'a>>,
    style: Style,
    alignment: Alignment,
}

impl<'a> SlotTextWidget<'a> {
    pub fn new(cells: &'a [Cell], easing: EasingType, theme: &'a Theme) -> Self {
        Self {
            cells,
            easing,
            theme,
            block: None,
            style: Style::default(),
            alignment: Alignment::Center,
        }
    }

    /// Current frame of a character sequencer
    pub fn chars(seq: &'a CharacterSequencer, theme: &'a Theme) -> Self {
        Self::new(seq.cells(), seq.options().easing, theme)
    }

    /// Current frame of a word sequencer; an empty list has nothing to render
    pub fn words(seq: &'a WordSequencer, theme: &'a Theme) -> Option<Self> {
        if seq.is_empty() {
            return None;
        }
        Some(Self::chars(seq.chars(), theme))
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Base style under every position
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// The frame as a line of per-position spans
    pub fn line(&self) -> Line<'static> {
        let spans: Vec<Span<'static>> = self
            .cells
            .iter()
            .map(|cell| {
                Span::styled(
                    cell.glyph.to_string(),
                    self.theme.cell_style(cell, self.easing),
                )
            })
            .collect();
        Line::from(spans)
    }

    /// Display width of the frame in terminal columns
    pub fn width(&self) -> u16 {
        let width: usize = self
            .cells
            .iter()
            .map(|cell| cell.glyph.width().unwrap_or(0))
            .sum();
        width.min(u16::MAX as usize) as u16
    }

    /// Where the glyphs land inside `area`; used for pointer hit testing
    pub fn text_area(&self, area: Rect) -> Rect {
        let inner = self.inner(area);
        let width = self.width().min(inner.width);
        let x = match self.alignment {
            Alignment::Left => inner.x,
            Alignment::Center => inner.x + (inner.width - width) / 2,
            Alignment::Right => inner.x + (inner.width - width),
        };
        let height = inner.height.min(1);
        Rect::new(x, inner.y + inner.height / 2, width, height)
    }

    fn inner(&self, area: Rect) -> Rect {
        match &self.block {
            Some(block) => block.inner(area),
            None => area,
        }
    }
}

impl Widget for SlotTextWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.inner(area);
        let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, inner.height.min(1));
        let line = self.line();

        if let Some(block) = self.block {
            block.render(area, buf);
        }
        if row.is_empty() {
            return;
        }
        Paragraph::new(line)
            .style(self.style)
            .alignment(self.alignment)
            .render(row, buf);
    }
}

/// Word-mode frame; an empty word list renders nothing
pub struct SlotWordsWidget<'a> {
    inner: Option<SlotTextWidget<'a>>,
}

impl<'a> SlotWordsWidget<'a> {
    pub fn new(seq: &'a WordSequencer, theme: &'a Theme) -> Self {
        Self {
            inner: SlotTextWidget::words(seq, theme),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.inner = self.inner.map(|inner| inner.block(block));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.inner = self.inner.map(|inner| inner.style(style));
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.inner = self.inner.map(|inner| inner.alignment(alignment));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    pub fn into_inner(self) -> Option<SlotTextWidget<'a>> {
        self.inner
    }
}

impl Widget for SlotWordsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(inner) = self.inner {
            inner.render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::widgets::Borders;
    use slot_text_core::sequencer::{SlotOptions, WordOrder};

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_settled_text_centered() {
        let options = SlotOptions {
            looping: false,
            ..Default::default()
        };
        let mut seq = CharacterSequencer::with_seed("hi", options, 1);
        seq.start(Duration::ZERO);
        seq.advance(Duration::from_secs(5));

        let theme = Theme::default();
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        SlotTextWidget::chars(&seq, &theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 1), "  hi  ");
        assert_eq!(row_text(&buf, 0), "      ");
        assert_eq!(buf[(2u16, 1u16)].fg, theme.fg);
    }

    #[test]
    fn test_one_span_per_position() {
        let seq = CharacterSequencer::with_seed("a b", SlotOptions::default(), 2);
        let theme = Theme::default();
        let widget = SlotTextWidget::chars(&seq, &theme);
        assert_eq!(widget.line().spans.len(), 3);
        assert_eq!(widget.width(), 3);
    }

    #[test]
    fn test_text_area_with_block() {
        let seq = CharacterSequencer::with_seed("abcd", SlotOptions::default(), 3);
        let theme = Theme::default();
        let widget = SlotTextWidget::chars(&seq, &theme).block(Block::default().borders(Borders::ALL));
        let hit = widget.text_area(Rect::new(0, 0, 12, 5));
        assert_eq!(hit, Rect::new(4, 2, 4, 1));

        let left = SlotTextWidget::chars(&seq, &theme).alignment(Alignment::Left);
        assert_eq!(left.text_area(Rect::new(3, 0, 12, 1)), Rect::new(3, 0, 4, 1));
    }

    #[test]
    fn test_empty_word_list_renders_nothing() {
        let seq = WordSequencer::with_seed(Vec::new(), WordOrder::Sequential, SlotOptions::for_words(), 4);
        let theme = Theme::default();
        assert!(SlotTextWidget::words(&seq, &theme).is_none());

        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        let widget = SlotWordsWidget::new(&seq, &theme);
        assert!(widget.is_empty());
        widget.block(Block::default().borders(Borders::ALL)).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_words_widget_renders_active_word() {
        let mut seq = WordSequencer::with_seed(
            vec!["ab".into(), "cd".into()],
            WordOrder::Sequential,
            SlotOptions::for_words(),
            5,
        );
        seq.start(Duration::ZERO);
        seq.advance(Duration::from_millis(1800));

        let theme = Theme::default();
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        SlotWordsWidget::new(&seq, &theme)
            .alignment(Alignment::Left)
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "ab  ");
    }
}
