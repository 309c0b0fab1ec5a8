use ratatui::style::{Color, Modifier, Style};

use slot_text_core::sequencer::{Cell, CellState};
use slot_text_core::EasingType;

/// Runtime theme with configurable colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    /// Settled characters
    pub fg: Color,
    /// Flicker glyphs at the start of their run
    pub dim: Color,
    /// Flicker glyphs about to settle
    pub accent: Color,
    pub status: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg: Color::Rgb(0x28, 0x28, 0x28),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            dim: Color::Rgb(0x7c, 0x6f, 0x64),
            accent: Color::Rgb(0xd8, 0xa6, 0x57),
            status: Color::Rgb(0x45, 0x40, 0x3d),
        }
    }
}

impl Theme {
    /// Style hook for one display position, keyed by the active easing
    pub fn cell_style(&self, cell: &Cell, easing: EasingType) -> Style {
        let base = Style::default().bg(self.bg);
        match cell.state {
            CellState::Blank => base,
            CellState::Settled => base.fg(self.fg).add_modifier(Modifier::BOLD),
            CellState::Flicker { .. } => {
                let eased = easing.apply(cell.progress()).clamp(0.0, 1.0);
                base.fg(mix(self.dim, self.accent, eased))
                    .add_modifier(flicker_modifier(easing))
            }
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.status)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.dim).bg(self.status)
    }
}

fn flicker_modifier(easing: EasingType) -> Modifier {
    match easing {
        EasingType::Bounce | EasingType::Sharp => Modifier::BOLD,
        EasingType::Elastic => Modifier::ITALIC,
        EasingType::Smooth | EasingType::Linear => Modifier::empty(),
    }
}

/// Blend two colors; non-RGB colors switch over at the midpoint
pub fn mix(from: Color, to: Color, t: f64) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => Color::Rgb(
            lerp_u8(r1, r2, t),
            lerp_u8(g1, g2, t),
            lerp_u8(b1, b2, t),
        ),
        _ if t < 0.5 => from,
        _ => to,
    }
}

#[inline]
fn lerp_u8(from: u8, to: u8, t: f64) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}
