//! Screen layout and width breakpoints
//!
//! All width thresholds live here so render code never compares raw numbers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols
    Compact,
    /// 60-119 cols
    Normal,
    /// 120+ cols: input and results side by side
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

/// Areas of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub input: Rect,
    pub results: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    /// Title on top, status at the bottom, panels in between
    ///
    /// Wide terminals put the panels side by side; otherwise the input sits
    /// above the results with about a third of the height.
    pub fn split(area: Rect, has_notice: bool) -> Self {
        let status_height = if has_notice { 3 } else { 2 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(status_height),
            ])
            .split(area);

        let panels = if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(rows[1])
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(rows[1])
        };

        Self {
            title: rows[0],
            input: panels[0],
            results: panels[1],
            status: rows[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Compact.at_least(Breakpoint::Normal));
    }

    #[test]
    fn wide_screens_split_horizontally() {
        let layout = ScreenLayout::split(Rect::new(0, 0, 160, 50), false);
        assert_eq!(layout.input.y, layout.results.y);
        assert!(layout.input.x < layout.results.x);
        assert_eq!(layout.status.height, 2);
    }

    #[test]
    fn narrow_screens_stack_panels() {
        let layout = ScreenLayout::split(Rect::new(0, 0, 80, 40), true);
        assert_eq!(layout.input.x, layout.results.x);
        assert!(layout.input.y < layout.results.y);
        assert_eq!(layout.status.height, 3);
        assert_eq!(layout.title.height, 3);
    }
}
