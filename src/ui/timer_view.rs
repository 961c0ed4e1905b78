//! Timer form: title input, elapsed clock and the idle gradient.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::state::{format_elapsed, Numerals, TaskTimer};
use crate::ui::widgets::{contrast_fg, Gradient};
use crate::ui::Theme;

/// Spinner frames shown next to the clock while a task runs.
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// The main timer screen.
pub struct TimerView;

impl TimerView {
    /// Render the timer view.
    ///
    /// `show_error` surfaces the validation message once the user has
    /// interacted with the field.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        timer: &TaskTimer,
        theme: &Theme,
        numerals: Numerals,
        show_error: bool,
        animation_frame: usize,
    ) {
        let gradient = Gradient::new(timer.idle_gradient());
        let mid = gradient.color_at(area.height / 2, area.height.max(1));
        let on_gradient = Style::default().fg(contrast_fg(mid));

        frame.render_widget(
            gradient.block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Task Timer · {} ", timer.idle_color_name()))
                    .border_style(on_gradient),
            ),
            area,
        );

        let inner = Self::centered_column(area, 48, 9);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Validation
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Clock
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        Self::render_input(frame, chunks[0], timer, theme);
        if show_error && !timer.is_running() {
            if let Err(e) = timer.input().validate() {
                let message = Paragraph::new(e.to_string())
                    .style(theme.error_style)
                    .alignment(Alignment::Center);
                frame.render_widget(message, chunks[1]);
            }
        }
        Self::render_clock(frame, chunks[3], timer, theme, numerals, animation_frame);

        let hint = if timer.is_running() {
            "Enter to finish"
        } else {
            "Enter to start · Tab for log · F1 for help"
        };
        frame.render_widget(
            Paragraph::new(hint).style(on_gradient).alignment(Alignment::Center),
            chunks[4],
        );
    }

    /// Render the title field.
    fn render_input(frame: &mut Frame, area: Rect, timer: &TaskTimer, theme: &Theme) {
        let input = timer.input();
        let style = if timer.is_running() {
            theme.input_locked_style
        } else if input.value().is_empty() || input.is_valid() {
            theme.input_style
        } else {
            theme.input_invalid_style
        };

        let title = if timer.is_running() { " Working on " } else { " What are you working on? " };
        let field = Paragraph::new(input.value())
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title).style(style));
        frame.render_widget(field, area);

        if !timer.is_running() {
            // Cursor sits after the text, clipped to the field.
            let offset = (input.value().width() as u16).min(area.width.saturating_sub(3));
            frame.set_cursor(area.x + 1 + offset, area.y + 1);
        }
    }

    /// Render the elapsed time.
    fn render_clock(
        frame: &mut Frame,
        area: Rect,
        timer: &TaskTimer,
        theme: &Theme,
        numerals: Numerals,
        animation_frame: usize,
    ) {
        let elapsed = format_elapsed(timer.elapsed(), numerals);
        let mut spans = vec![Span::styled(elapsed, theme.clock_style.add_modifier(Modifier::BOLD))];
        if timer.is_running() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                SPINNER[animation_frame % SPINNER.len()],
                theme.status_running,
            ));
        }

        let clock = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).style(theme.input_style));
        frame.render_widget(clock, area);
    }

    /// A rect of at most `width` x `height` centered in `r`.
    fn centered_column(r: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(r.width.saturating_sub(2));
        let height = height.min(r.height.saturating_sub(2));
        Rect {
            x: r.x + (r.width - width) / 2,
            y: r.y + (r.height - height) / 2,
            width,
            height,
        }
    }
}
