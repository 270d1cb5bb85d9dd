//! Unlock popup: shared admin passcode entry.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{center_rect, popup_block, render_popup_background};
use crate::tui::theme::Theme;

#[derive(Default)]
pub struct LoginPopup {
    pub input: String,
    pub busy: bool,
    pub error: Option<String>,
}

impl LoginPopup {
    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let area = center_rect(42, 7, frame.area());
        render_popup_background(frame, area);

        let block = popup_block("Unlock editing", theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // The passcode never renders in clear text.
        let masked = "•".repeat(self.input.chars().count());
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Passcode: ", Style::default().fg(theme.text)),
                Span::styled(masked, Style::default().fg(theme.text)),
                Span::styled(
                    "_",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ]),
        ];

        if self.busy {
            lines.push(Line::from(Span::styled(
                "  Checking…",
                Style::default().fg(theme.dim),
            )));
        } else if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "  Enter",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" unlock  ", Style::default().fg(theme.text)),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" cancel", Style::default().fg(theme.text)),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
