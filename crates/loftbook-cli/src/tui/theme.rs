//! Color palette for the TUI

use ratatui::style::Color;

pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Gray,
            dim: Color::DarkGray,
            accent: Color::Magenta,
            header: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}
