//! UI theme definition.

use ratatui::style::{Color, Modifier, Style};

/// Theme for the application UI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Basic styles
    pub normal_text: Style,
    pub selected_style: Style,
    pub block_style: Style,
    pub header_style: Style,
    pub label_style: Style,
    pub value_style: Style,

    // Status styles
    pub error_style: Style,
    pub help_style: Style,
    pub status_idle: Style,
    pub status_running: Style,

    // Key styles
    pub key_style: Style,

    // Form styles
    pub input_style: Style,
    pub input_invalid_style: Style,
    pub input_locked_style: Style,
    pub clock_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Basic styles
            normal_text: Style::default().fg(Color::White),
            selected_style: Style::default().fg(Color::Black).bg(Color::White),
            block_style: Style::default(),
            header_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Gray),
            value_style: Style::default().fg(Color::White),

            // Status styles
            error_style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            help_style: Style::default().fg(Color::Gray),
            status_idle: Style::default().fg(Color::Green),
            status_running: Style::default().fg(Color::Yellow),

            // Key styles
            key_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),

            // Form styles
            input_style: Style::default().fg(Color::White).bg(Color::Black),
            input_invalid_style: Style::default().fg(Color::LightRed).bg(Color::Black),
            input_locked_style: Style::default().fg(Color::DarkGray).bg(Color::Black),
            clock_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        }
    }
}
