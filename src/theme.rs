//! Light and dark colour palettes.
//!
//! The starting theme follows the local time of day; `t` flips it for the
//! rest of the session.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Colours used by [`crate::ui`].
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub badge: Color,
    pub status: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

impl Theme {
    /// Light from 06:00 until 19:00, dark otherwise.
    pub fn for_hour(hour: u32) -> Self {
        if (6..19).contains(&hour) {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                bg: Color::Reset,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                badge: Color::Yellow,
                status: Color::Yellow,
                error: Color::LightRed,
                highlight_bg: Color::DarkGray,
            },
            Self::Light => Palette {
                bg: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                badge: Color::Magenta,
                status: Color::Blue,
                error: Color::Red,
                highlight_bg: Color::Gray,
            },
        }
    }
}
