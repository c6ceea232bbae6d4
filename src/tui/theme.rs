// Theme system for the TUI
//
// Two palettes, light and dark, switched at runtime with F2. The choice is
// persisted through `prefs::PreferenceStore`.

use crate::model::Tier;
use crate::prefs::ThemePreference;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub preference: ThemePreference,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    // Chrome
    pub title: Color,
    pub status_bar: Color,
    pub highlight: Color,

    // Selection
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Results
    pub unit_header: Color,
    pub very_important: Color,
    pub important: Color,
    pub link: Color,

    // Feedback
    pub success: Color,
    pub warn: Color,
    pub error: Color,
}

impl Theme {
    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Self::dark(),
            ThemePreference::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            preference: ThemePreference::Dark,
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(156, 163, 175),
            border: Color::Rgb(75, 85, 99),
            border_focused: Color::Rgb(96, 165, 250),
            border_type: BorderType::Rounded,

            title: Color::Rgb(147, 197, 253),
            status_bar: Color::Rgb(156, 163, 175),
            highlight: Color::Rgb(96, 165, 250),

            selected_bg: Color::Rgb(31, 41, 55),
            selected_fg: Color::Rgb(250, 204, 21),

            unit_header: Color::Rgb(243, 244, 246),
            very_important: Color::Rgb(248, 113, 113),
            important: Color::Rgb(251, 191, 36),
            link: Color::Rgb(96, 165, 250),

            success: Color::Rgb(74, 222, 128),
            warn: Color::Rgb(250, 204, 21),
            error: Color::Rgb(248, 113, 113),
        }
    }

    pub fn light() -> Self {
        Self {
            preference: ThemePreference::Light,
            bg: Color::Rgb(249, 250, 251),
            fg: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(209, 213, 219),
            border_focused: Color::Rgb(37, 99, 235),
            border_type: BorderType::Rounded,

            title: Color::Rgb(29, 78, 216),
            status_bar: Color::Rgb(75, 85, 99),
            highlight: Color::Rgb(37, 99, 235),

            selected_bg: Color::Rgb(219, 234, 254),
            selected_fg: Color::Rgb(30, 64, 175),

            unit_header: Color::Rgb(17, 24, 39),
            very_important: Color::Rgb(220, 38, 38),
            important: Color::Rgb(217, 119, 6),
            link: Color::Rgb(37, 99, 235),

            success: Color::Rgb(22, 163, 74),
            warn: Color::Rgb(202, 138, 4),
            error: Color::Rgb(220, 38, 38),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tier_style(&self, tier: Tier) -> Style {
        match tier {
            Tier::VeryImportant => Style::default()
                .fg(self.very_important)
                .add_modifier(Modifier::BOLD),
            Tier::Important => Style::default().fg(self.important),
        }
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link)
            .add_modifier(Modifier::UNDERLINED)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_preference(ThemePreference::default())
    }
}
