//! Popup state and shared chrome

mod filters;
mod login;

pub use filters::FilterPopup;
pub use login::LoginPopup;

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

use super::theme::Theme;

/// Centered rect of at most `width` x `height` inside `area`.
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

/// Bordered popup frame.
pub fn popup_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
}

/// Clear whatever the popup is drawn over.
pub fn render_popup_background(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}
