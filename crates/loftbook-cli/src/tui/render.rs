//! Rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use loftbook_core::columns::{ColumnConfig, ColumnKind};
use loftbook_core::rows::SkillRow;
use loftbook_core::table::SaveStatus;

use crate::tui::state::{App, Mode, APPARATUS_TABS};
use crate::tui::theme::Theme;

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = Theme::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tabs(frame, app, &theme, chunks[0]);
    draw_table(frame, app, &theme, chunks[1]);
    draw_status_bar(frame, app, &theme, chunks[2]);

    if let Some(popup) = &app.filter_popup {
        popup.render(frame, &theme, &app.table);
    }
    if let Some(popup) = &app.login_popup {
        popup.render(frame, &theme);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(0)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            " Aerial Skills",
            Style::default()
                .fg(theme.header)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    let titles: Vec<Line> = APPARATUS_TABS.iter().map(|tab| Line::from(*tab)).collect();
    let tabs = Tabs::new(titles)
        .select(app.apparatus_tab)
        .style(Style::default().fg(theme.dim))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[1]);
}

/// Preferred column widths, mirroring the table's relative proportions.
fn column_width(key: &str) -> u16 {
    match key {
        "apparatus" => 12,
        "skill" => 22,
        "level" => 14,
        "focus" => 18,
        "confidence" => 16,
        "difficulty" => 16,
        "status" => 14,
        "notes" => 28,
        _ => 14,
    }
}

fn draw_table(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let columns = app.table.columns();
    let visible = app.visible();

    let header_style = Style::default()
        .fg(theme.header)
        .add_modifier(Modifier::BOLD);

    // Active per-column filters render as a second header line.
    let any_filters = columns
        .iter()
        .any(|col| !app.table.filter(col.key).is_empty());
    let mut header_cells: Vec<Cell> = columns
        .iter()
        .map(|col| {
            let mut lines = vec![Line::from(Span::styled(col.header, header_style))];
            let filter = app.table.filter(col.key);
            if !filter.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("⌕ {filter}"),
                    Style::default().fg(theme.warning),
                )));
            }
            Cell::from(Text::from(lines))
        })
        .collect();
    header_cells.push(Cell::from(Span::styled("Actions", header_style)));
    let header = Row::new(header_cells).height(if any_filters { 2 } else { 1 });

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(display_idx, &row_idx)| {
            let skill = &app.table.rows()[row_idx];
            let on_cursor_row = display_idx == app.cursor_row;

            let mut cells: Vec<Cell> = columns
                .iter()
                .enumerate()
                .map(|(col_idx, col)| {
                    let selected = on_cursor_row && col_idx == app.cursor_col;
                    let style = if selected {
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    Cell::from(Span::styled(cell_text(app, skill, col, selected), style))
                })
                .collect();

            // The delete control renders disabled while read-only.
            let actions_selected = on_cursor_row && app.cursor_col == columns.len();
            let actions_style = if !app.is_admin {
                Style::default().fg(theme.dim)
            } else if actions_selected {
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.error)
            };
            cells.push(Cell::from(Span::styled("Delete", actions_style)));

            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|col| Constraint::Length(column_width(col.key)))
        .chain(std::iter::once(Constraint::Length(8)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.dim)),
        )
        .column_spacing(1);
    frame.render_widget(table, area);

    if visible.is_empty() {
        let message = Paragraph::new(Span::styled(
            "No rows match your filters.",
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center);
        let y = area.y + area.height / 2;
        frame.render_widget(
            message,
            Rect::new(area.x + 1, y, area.width.saturating_sub(2), 1),
        );
    }
}

/// What a cell shows: its value, or the in-place editor on the cursor.
fn cell_text(app: &App, skill: &SkillRow, col: &ColumnConfig, selected: bool) -> String {
    if selected {
        if let Mode::Edit { buffer, option } = &app.mode {
            return match col.kind {
                ColumnKind::Select(options) => {
                    let label = if *option == 0 {
                        "—"
                    } else {
                        options[*option - 1]
                    };
                    format!("◀ {label} ▶")
                }
                _ => format!("{buffer}_"),
            };
        }
    }
    skill.text(col.key)
}

fn draw_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];

    if app.is_admin {
        spans.push(Span::styled(
            "Editing ✓",
            Style::default().fg(theme.success),
        ));
        let (label, color) = match app.table.save_status() {
            SaveStatus::Saving => ("Saving…", theme.warning),
            SaveStatus::Saved => ("Saved", theme.success),
            SaveStatus::Error => ("Save failed", theme.error),
            SaveStatus::Idle => ("—", theme.dim),
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(label, Style::default().fg(color)));
    } else {
        spans.push(Span::styled("Read-only", Style::default().fg(theme.dim)));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("{}/{} rows", app.visible().len(), app.table.rows().len()),
        Style::default().fg(theme.dim),
    ));

    if let Some(message) = &app.status_line {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(theme.warning),
        ));
    }

    let hints = if app.is_admin {
        "Enter edit  a add  d delete  / filter  u lock  q quit "
    } else {
        "u unlock  / filter  Tab apparatus  q quit "
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(hints.chars().count() as u16),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(theme.dim)))
            .alignment(Alignment::Right),
        chunks[1],
    );
}
