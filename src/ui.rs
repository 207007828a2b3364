use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, Widget},
};

use crate::claims::ClaimStatus;
use crate::domain::Config;
use crate::model::{Model, SelectorData, UIData};

pub const HEADER_HEIGHT: usize = 3;
pub const SEARCH_HEIGHT: usize = 3;
pub const STATUSLINE_HEIGHT: usize = 1;
// Table borders plus its header row
pub const TABLE_CHROME_HEIGHT: usize = 3;

#[derive(Debug, Default)]
pub struct ClaimsUI {}

impl ClaimsUI {
    pub fn new(_cfg: &Config) -> Self {
        Self {}
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let full = frame.area();

        let [header_area, search_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT as u16),
            Constraint::Length(SEARCH_HEIGHT as u16),
            Constraint::Min(1),
            Constraint::Length(STATUSLINE_HEIGHT as u16),
        ])
        .areas(full);

        render_header(frame, header_area);
        render_search(uidata, frame, search_area);
        render_table(uidata, frame, table_area);
        render_status_line(uidata, frame, status_area);

        if let Some(selector) = &uidata.selector {
            render_status_selector(selector, frame, full);
        }
        if uidata.show_popup {
            render_popup(&uidata.popup_message, frame, full);
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(" Claims ".bold());
    let instructions = Line::from(vec![
        " Search ".into(),
        "</>".blue().bold(),
        " Sort ".into(),
        "<1-5>".blue().bold(),
        " Status ".into(),
        "<Enter>".blue().bold(),
        " New ".into(),
        "<n>".blue().bold(),
        " Help ".into(),
        "<?>".blue().bold(),
        " Quit ".into(),
        "<q> ".blue().bold(),
    ]);
    let block = Block::bordered()
        .title(title.centered())
        .title_bottom(instructions.centered())
        .border_set(border::THICK);
    block.render(area, frame.buffer_mut());
}

fn render_search(uidata: &UIData, frame: &mut Frame, area: Rect) {
    let block = if uidata.active_search {
        Block::bordered().title(" Search ".bold())
    } else {
        Block::bordered().title(" Search ")
    };

    let line = if uidata.active_search {
        // Show the inputter cursor inside the typed text
        let input = &uidata.search.input;
        let pos = input
            .char_indices()
            .nth(uidata.search.cursor_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(input.len());
        let (before, rest) = input.split_at(pos);
        let mut chars = rest.chars();
        let under_cursor = chars.next().map(String::from).unwrap_or(" ".to_string());
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(under_cursor, Style::new().reversed()),
            Span::raw(chars.as_str().to_string()),
        ])
    } else if uidata.query.is_empty() {
        Line::from("Search claims...".dim().italic())
    } else {
        Line::from(uidata.query.clone())
    };

    Paragraph::new(line).block(block).render(area, frame.buffer_mut());
}

fn render_table(uidata: &UIData, frame: &mut Frame, area: Rect) {
    let title = Line::from(format!(" {} ", uidata.name).bold());
    let counts = Line::from(format!(" {} of {} ", uidata.nrows, uidata.total).dim());
    let block = Block::bordered().title(title).title_top(counts.right_aligned());

    if uidata.rows.is_empty() {
        // Explicit placeholder instead of an empty table body
        let placeholder = Paragraph::new("No claims found.".dim().italic())
            .centered()
            .block(block);
        placeholder.render(area, frame.buffer_mut());
        return;
    }

    let header = Row::new(uidata.headers.iter().enumerate().map(|(idx, label)| {
        let cell = Cell::from(label.clone());
        if idx == uidata.selected_column {
            cell.style(Style::new().bold().underlined())
        } else {
            cell.style(Style::new().bold())
        }
    }));

    let rows = uidata.rows.iter().enumerate().map(|(idx, row)| {
        let cells = row.cells.iter().enumerate().map(|(cidx, value)| {
            let cell = Cell::from(value.clone());
            match cidx {
                // Claim numbers double as detail links
                0 => cell.style(Style::new().fg(Color::Blue)),
                3 => cell.style(Style::new().dim()),
                4 => Cell::from(
                    Line::from(Span::styled(value.clone(), status_style(row.status))),
                ),
                _ => cell,
            }
        });
        let table_row = Row::new(cells);
        if idx == uidata.selected_row {
            table_row.style(Style::new().reversed())
        } else {
            table_row
        }
    });

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(19),
        Constraint::Length(12),
    ];

    Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .render(area, frame.buffer_mut());
}

fn render_status_line(uidata: &UIData, frame: &mut Frame, area: Rect) {
    let link_width = (uidata.link.len() as u16 + 1).min(area.width / 2);
    let [message_area, link_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(link_width)]).areas(area);

    Paragraph::new(uidata.status_message.clone())
        .render(message_area, frame.buffer_mut());
    Paragraph::new(uidata.link.clone().dim())
        .alignment(Alignment::Right)
        .render(link_area, frame.buffer_mut());
}

fn render_status_selector(selector: &SelectorData, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(26, (selector.choices.len() + 2) as u16, area);
    let block = Block::bordered().title(" Status ".bold());

    let lines: Vec<Line> = selector
        .choices
        .iter()
        .enumerate()
        .map(|(idx, &status)| {
            let marker = if idx == selector.highlighted { "› " } else { "  " };
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(status.as_str(), status_style(status)),
            ];
            if status == selector.current {
                spans.push(Span::raw(" (current)").dim());
            }
            let line = Line::from(spans);
            if idx == selector.highlighted {
                line.style(Style::new().bold())
            } else {
                line
            }
        })
        .collect();

    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(lines).block(block).render(popup, frame.buffer_mut());
}

fn render_popup(message: &str, frame: &mut Frame, area: Rect) {
    let height = (message.lines().count() as u16 + 2).min(area.height);
    let popup = centered_rect(44, height, area);
    let block = Block::bordered().title(" Help ".bold());
    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(message.to_string())
        .block(block)
        .render(popup, frame.buffer_mut());
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Fixed badge style per status, the same mapping everywhere a status shows up.
pub fn status_style(status: ClaimStatus) -> Style {
    match status {
        ClaimStatus::OPEN => Style::new().fg(Color::Gray).bold(),
        ClaimStatus::PENDING => Style::new().fg(Color::Yellow).bold(),
        ClaimStatus::COMPLETED => Style::new().fg(Color::Green).bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_its_own_badge_style() {
        let styles: Vec<Style> = ClaimStatus::ALL.iter().map(|&s| status_style(s)).collect();
        assert_ne!(styles[0], styles[1]);
        assert_ne!(styles[1], styles[2]);
        assert_ne!(styles[0], styles[2]);
    }

    #[test]
    fn centered_rect_stays_inside_the_area() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_rect(26, 5, area);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);

        // Oversized requests are clamped
        let popup = centered_rect(200, 50, area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 24);
    }
}
