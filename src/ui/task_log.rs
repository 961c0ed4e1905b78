//! Completed task table, newest first.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::state::{format_elapsed, parse_hex, Numerals, TaskLog, TaskRecord};
use crate::ui::Theme;

/// Task log view with a scrollable selection.
#[derive(Debug, Clone, Default)]
pub struct TaskLogView {
    /// Table state for cursor position
    table_state: TableState,
}

impl TaskLogView {
    /// Create a new task log view.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Render the task log view.
    pub fn render(&self, frame: &mut Frame, area: Rect, log: &TaskLog, theme: &Theme, numerals: Numerals) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(3),    // Task table
            ])
            .split(area);

        Self::render_header(frame, chunks[0], log, theme, numerals);
        self.render_table(frame, chunks[1], log, theme, numerals);
    }

    /// Render the header with totals.
    fn render_header(frame: &mut Frame, area: Rect, log: &TaskLog, theme: &Theme, numerals: Numerals) {
        let header_text = Line::from(vec![
            Span::styled(format!("Tasks ({} total)", log.len()), theme.header_style),
            Span::raw(" | "),
            Span::styled("Time spent: ", theme.label_style),
            Span::styled(format_elapsed(log.total_time(), numerals), theme.value_style),
            Span::raw(" | "),
            Span::styled("Tab to return", theme.help_style),
        ]);

        let header = Paragraph::new(header_text)
            .style(theme.normal_text)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    /// Render the main table.
    fn render_table(&self, frame: &mut Frame, area: Rect, log: &TaskLog, theme: &Theme, numerals: Numerals) {
        let header_cells = ["#", "Task", "Time", "Colors", "Completed"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.header_style));
        let header = Row::new(header_cells).style(theme.header_style);

        let count = log.len();
        let rows = log
            .newest_first()
            .enumerate()
            .map(|(i, record)| format_record_row(count - i, record, numerals));

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Percentage(50),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(17),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).style(theme.block_style))
        .highlight_style(theme.selected_style);

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: crossterm::event::KeyEvent, len: usize) {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next(len),
            KeyCode::Up | KeyCode::Char('k') => self.previous(len),
            KeyCode::Home | KeyCode::Char('g') => self.first(len),
            KeyCode::End | KeyCode::Char('G') => self.last(len),
            _ => {}
        }
    }

    /// Select the next row.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => len - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Select the previous row.
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1).min(len - 1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn first(&mut self, len: usize) {
        self.table_state.select((len > 0).then_some(0));
    }

    pub fn last(&mut self, len: usize) {
        self.table_state.select(len.checked_sub(1));
    }
}

/// Format a single table row.
fn format_record_row(number: usize, record: &TaskRecord, numerals: Numerals) -> Row<'static> {
    let swatch = |hex: &str| {
        let color = parse_hex(hex)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(Color::Reset);
        Span::styled("███", Style::default().fg(color))
    };
    let colors = Line::from(vec![swatch(&record.colors().from), swatch(&record.colors().to)]);

    let completed = record
        .completion_time()
        .map(|at| at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    Row::new(vec![
        Cell::from(numerals.localize(&number.to_string())),
        Cell::from(record.title().to_string()),
        Cell::from(format_elapsed(record.time_taken(), numerals)),
        Cell::from(colors),
        Cell::from(numerals.localize(&completed)),
    ])
}
