use ratatui::layout::{Position, Rect};

/// Pointer crossing the rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Enter,
    Leave,
}

/// Turns raw pointer positions into enter/leave transitions over a region
#[derive(Debug, Default)]
pub struct HoverTracker {
    region: Rect,
    pointer: Option<Position>,
    inside: bool,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the hit region, e.g. after a resize or a text change
    pub fn set_region(&mut self, region: Rect) -> Option<HoverChange> {
        self.region = region;
        self.update()
    }

    pub fn pointer_moved(&mut self, column: u16, row: u16) -> Option<HoverChange> {
        self.pointer = Some(Position::new(column, row));
        self.update()
    }

    /// Pointer left the terminal altogether
    pub fn pointer_left(&mut self) -> Option<HoverChange> {
        self.pointer = None;
        self.update()
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    fn update(&mut self) -> Option<HoverChange> {
        let inside = self
            .pointer
            .is_some_and(|pointer| self.region.contains(pointer));
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            HoverChange::Enter
        } else {
            HoverChange::Leave
        })
    }
}
