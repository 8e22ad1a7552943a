use crate::filter::truncate_display;
use crate::output::highlight_positions;
use crate::tui::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Field inputs
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_inputs(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    // Suggestions overlay the table just under the focused box
    if !app.suggestions.is_empty() {
        let input_area = input_areas(app, chunks[0])
            .get(app.focused)
            .copied()
            .unwrap_or(chunks[0]);
        draw_suggestions(f, app, input_area, chunks[1]);
    }

    if app.mode == Mode::Help {
        draw_help(f, chunks[1]);
    }
}

fn input_areas(app: &App, area: Rect) -> Vec<Rect> {
    let count = app.fields.len().max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

fn draw_inputs(f: &mut Frame, app: &App, area: Rect) {
    let areas = input_areas(app, area);

    for (i, field) in app.fields.iter().enumerate() {
        let Some(&rect) = areas.get(i) else {
            continue;
        };
        let focused = i == app.focused;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input = Paragraph::new(app.inputs[i].as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", field)),
        );
        f.render_widget(input, rect);

        if focused {
            let x = cursor_x(rect, app.inputs[i].chars().count());
            f.set_cursor_position((x, rect.y + 1));
        }
    }
}

/// Cursor column after `typed` characters, kept inside the box border
fn cursor_x(rect: Rect, typed: usize) -> u16 {
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    let x = rect.x.saturating_add(1).saturating_add(typed);
    x.min(rect.right().saturating_sub(2))
}

fn draw_suggestions(f: &mut Frame, app: &App, anchor: Rect, below: Rect) {
    let rows = u16::try_from(app.suggestions.len()).unwrap_or(u16::MAX);
    let height = rows.saturating_add(2).min(below.height);
    let area = Rect {
        x: anchor.x,
        y: below.y,
        width: anchor.width,
        height,
    };

    let query = app.focused_input();
    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let shown = truncate_display(suggestion, app.suggestion_max_length);
            let marks = highlight_positions(shown, query, app.case_sensitive);
            let mut spans = marked_spans(shown, &marks);
            if shown.len() < suggestion.len() {
                spans.push(Span::raw("..."));
            }

            let style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} suggestions ", app.suggestions.len())),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

fn marked_spans(text: &str, marks: &[usize]) -> Vec<Span<'static>> {
    let mark_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            if marks.contains(&i) {
                Span::styled(ch.to_string(), mark_style)
            } else {
                Span::raw(ch.to_string())
            }
        })
        .collect()
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let page = app.current_page();
    let dataset = app.dataset();
    let columns = dataset.columns();

    let header = Row::new(columns.iter().map(|c| Cell::from(c.as_str())))
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));

    let rows: Vec<Row> = page
        .rows
        .iter()
        .filter_map(|&index| dataset.row(index))
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))))
        .collect();

    let count = columns.len().max(1) as u32;
    let widths: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();

    let table = Table::new(rows, widths).header(header).block(
        Block::default().borders(Borders::ALL).title(format!(
            " Rows {} (page {}/{}, PgUp/PgDn) ",
            page.total_rows,
            page.number + 1,
            page.total_pages
        )),
    );

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let case = if app.case_sensitive { "Aa" } else { "aA" };
    let line = Line::from(vec![
        Span::styled(format!("[{}] ", case), Style::default().fg(Color::Yellow)),
        Span::styled(app.status_message.as_str(), Style::default().fg(Color::Cyan)),
        Span::styled("  F1: help", Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Type to see suggestions for the focused field"),
        Line::from(""),
        Line::from("Tab / Shift+Tab   switch field"),
        Line::from("Up / Down         choose a suggestion"),
        Line::from("Enter             filter rows by the suggestion"),
        Line::from("Esc               close suggestions, clear input, quit"),
        Line::from("Ctrl+T            toggle case sensitivity"),
        Line::from("Ctrl+W            delete word"),
        Line::from("Ctrl+R            reset all filters"),
        Line::from("PgUp / PgDn       page through rows"),
        Line::from("Ctrl+C            quit"),
    ];

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
