use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::browser::BrowserApp;
use crate::topmenu::TopMenuApp;
use crate::util::truncate_label;

/// Column budget for one list label before the trailing ellipsis kicks in.
pub const LABEL_BUDGET: usize = 56;

const VERSION_TAG: &str = concat!("v", env!("CARGO_PKG_VERSION"));

fn screen_chunks(frame: &Frame<'_>, visible_rows: usize) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(visible_rows as u16 + 2),
            Constraint::Min(1),
        ])
        .split(frame.size())
}

fn attention(line: String) -> Line<'static> {
    Line::styled(line, Style::default().fg(Color::Red))
}

fn render_footer(frame: &mut Frame<'_>, area: Rect) {
    let version = Paragraph::new(VERSION_TAG).alignment(Alignment::Right);
    frame.render_widget(version, area);
}

pub fn draw_top_menu(frame: &mut Frame<'_>, app: &TopMenuApp) {
    let geometry = app.geometry();
    let chunks = screen_chunks(frame, geometry.visible_rows);

    let mut header_lines = vec![Line::from("Select a source or favorite")];
    if let Some(favorite) = app.pending_removal() {
        header_lines.push(attention(format!(
            "Remove favorite {}? (y/n)",
            truncate_label(&favorite.path.display().to_string(), LABEL_BUDGET)
        )));
    } else if let Some(notice) = app.notice() {
        header_lines.push(attention(notice.to_string()));
    } else {
        header_lines.push(Line::from(""));
    }
    header_lines.push(Line::from(
        "Keys: Enter select | x remove favorite | Up/Down move | Left/Right page | q quit",
    ));
    let header =
        Paragraph::new(header_lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let scroll = app.scroll();
    let start = scroll.window_offset;
    let end = (start + geometry.visible_rows).min(app.entries().len());
    let mut items = Vec::with_capacity(end.saturating_sub(start));
    for (offset, entry) in app.entries()[start..end].iter().enumerate() {
        let index = start + offset;
        let label = truncate_label(&app.entry_label(entry), LABEL_BUDGET);
        let mut style = if app.entry_valid(entry) {
            Style::default()
        } else {
            Style::default().fg(Color::Red)
        };
        if index == scroll.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        items.push(ListItem::new(label).style(style));
    }
    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, chunks[1]);

    render_footer(frame, chunks[2]);
}

pub fn draw_browser(frame: &mut Frame<'_>, app: &BrowserApp) {
    let geometry = app.geometry();
    let chunks = screen_chunks(frame, geometry.visible_rows);

    let breadcrumb = truncate_label(&app.cwd().display().to_string(), LABEL_BUDGET);
    let mut header_lines = vec![Line::from(breadcrumb)];
    match app.notice() {
        Some(notice) => header_lines.push(attention(notice.to_string())),
        None => header_lines.push(Line::from("")),
    }
    header_lines.push(Line::from(
        "Keys: Enter open | Backspace up | l load save | Up/Down move | Left/Right page | q quit",
    ));
    let header =
        Paragraph::new(header_lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let scroll = app.scroll();
    let start = scroll.window_offset;
    let end = (start + geometry.visible_rows).min(app.entries().len());
    let mut items = Vec::with_capacity(end.saturating_sub(start));
    for (offset, entry) in app.entries()[start..end].iter().enumerate() {
        let index = start + offset;
        let label = if entry.is_directory {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let mut style = Style::default();
        if index == scroll.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        items.push(ListItem::new(truncate_label(&label, LABEL_BUDGET)).style(style));
    }
    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, chunks[1]);

    render_footer(frame, chunks[2]);
}
