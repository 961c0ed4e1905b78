//! Help overlay showing keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::{Style, Modifier};
use ratatui::text::{Line, Span};

use crate::ui::{Theme, ViewState};

/// Help overlay showing keyboard shortcuts and usage information.
pub struct HelpView;

impl HelpView {
    /// Render the help overlay
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme, current_view: &ViewState) {
        let popup_area = Self::centered_rect(60, 70, area);

        // Clear the background
        frame.render_widget(Clear, popup_area);

        let help_block = Block::default()
            .title("Task Timer Help")
            .borders(Borders::ALL)
            .style(theme.block_style);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![Span::styled(k, theme.key_style), Span::raw(what)])
        };

        let mut help_text = vec![
            Line::from(vec![Span::styled("Global Shortcuts", bold)]),
            Line::from(""),
            key("F1", " - Toggle this help screen"),
            key("Tab", " - Switch between timer and task log"),
            key("Ctrl-C", " - Quit (a running task is recorded first)"),
            Line::from(""),
        ];

        match current_view {
            ViewState::Timer => help_text.extend([
                Line::from(vec![Span::styled("Timer", bold)]),
                Line::from(""),
                key("type", " - Enter a task title (3+ characters)"),
                key("Enter", " - Start the task, or finish it when running"),
                key("Esc", " - Quit"),
            ]),
            ViewState::Log => help_text.extend([
                Line::from(vec![Span::styled("Task Log", bold)]),
                Line::from(""),
                key("j/k", " - Move selection"),
                key("g/G", " - First / last task"),
                key("q", " - Quit"),
            ]),
        }

        let help_widget = Paragraph::new(help_text)
            .block(help_block)
            .style(theme.normal_text)
            .alignment(Alignment::Left);

        frame.render_widget(help_widget, popup_area);
    }

    /// Helper function to create a centered rect using percentages
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_width = (u32::from(r.width) * u32::from(percent_x) / 100) as u16;
        let popup_height = (u32::from(r.height) * u32::from(percent_y) / 100) as u16;

        let popup_x = (r.width - popup_width) / 2;
        let popup_y = (r.height - popup_height) / 2;

        Rect {
            x: r.x + popup_x,
            y: r.y + popup_y,
            width: popup_width,
            height: popup_height,
        }
    }
}
