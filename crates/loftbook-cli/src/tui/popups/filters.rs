//! Column filter popup
//!
//! Lists every column with a text input. Filters apply live as they are
//! typed and only narrow which rows are visible.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use loftbook_core::table::TableState;

use super::{center_rect, popup_block, render_popup_background};
use crate::tui::theme::Theme;

/// Filter popup state; the filter values themselves live in the table.
#[derive(Default)]
pub struct FilterPopup {
    /// Index of the focused column input.
    pub selected: usize,
}

impl FilterPopup {
    pub fn render(&self, frame: &mut Frame, theme: &Theme, table: &TableState) {
        let height = table.columns().len() as u16 + 5;
        let area = center_rect(52, height, frame.area());
        render_popup_background(frame, area);

        let block = popup_block("Filters", theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (index, col) in table.columns().iter().enumerate() {
            let focused = index == self.selected;
            let marker = if focused { "▶ " } else { "  " };
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let mut spans = vec![
                Span::styled(format!("{marker}{:<18}", col.header), label_style),
                Span::styled(
                    table.filter(col.key).to_string(),
                    Style::default().fg(theme.text),
                ),
            ];
            if focused {
                spans.push(Span::styled(
                    "_",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(hint_line(theme));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn hint_line(theme: &Theme) -> Line<'static> {
    let key = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text);
    Line::from(vec![
        Span::styled("↑↓", key),
        Span::styled(" column  ", text),
        Span::styled("type", key),
        Span::styled(" to filter  ", text),
        Span::styled("^U", key),
        Span::styled(" clear  ", text),
        Span::styled("^X", key),
        Span::styled(" clear all  ", text),
        Span::styled("Esc", key),
        Span::styled(" done", text),
    ])
}
