use ratatui::style::Color;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub divider: Color,
    pub primary: Color,
    pub secondary: Color,
    pub error: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    /// Ocean Professional palette: blue primary, amber accents.
    pub fn ocean() -> Self {
        Self {
            background: Color::Reset,
            surface: Color::Rgb(31, 41, 55),
            text: Color::Rgb(249, 250, 251),
            muted: Color::Rgb(107, 114, 128),
            divider: Color::Rgb(55, 65, 81),
            primary: Color::Rgb(37, 99, 235),
            secondary: Color::Rgb(245, 158, 11),
            error: Color::Rgb(239, 68, 68),
            status_bar_bg: Color::Rgb(17, 24, 39),
            status_bar_fg: Color::Rgb(229, 231, 235),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            surface: Color::Rgb(40, 40, 40),
            text: Color::White,
            muted: Color::DarkGray,
            divider: Color::Rgb(60, 60, 60),
            primary: Color::Cyan,
            secondary: Color::Yellow,
            error: Color::Red,
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            surface: Color::Rgb(235, 235, 235),
            text: Color::Black,
            muted: Color::Gray,
            divider: Color::Rgb(200, 200, 200),
            primary: Color::Blue,
            secondary: Color::Rgb(180, 130, 0),
            error: Color::Rgb(200, 50, 50),
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::ocean(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ocean()
    }
}
