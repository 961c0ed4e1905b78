//! UI components for the task timer.
//!
//! A small two-view state machine: the timer form and the task log, with a
//! help overlay and confetti drawn on top of whichever view is active.

pub mod help;
pub mod task_log;
pub mod theme;
pub mod timer_view;
pub mod widgets;

pub use help::HelpView;
pub use task_log::TaskLogView;
pub use theme::Theme;
pub use timer_view::TimerView;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::effects::SharedConfetti;
use crate::state::{format_elapsed, Numerals, TaskTimer};
use widgets::ConfettiOverlay;

/// The result of updating the UI in response to user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Type a character into the title field
    Input(char),
    /// Delete the last character of the title
    Backspace,
    /// Start or finish the current task
    Submit,
    /// Other update (no action needed)
    Other,
}

/// Available views in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Title form and running clock
    Timer,
    /// Completed tasks
    Log,
}

/// Main UI controller.
pub struct Ui {
    /// Current view state
    state: ViewState,
    /// Whether to show help overlay
    show_help: bool,
    /// UI theme
    theme: Theme,
    /// Digits used for every displayed number
    numerals: Numerals,
    /// Task log view state
    log_view: TaskLogView,
    /// Whether the user has interacted with the title field
    touched: bool,
    /// Current animation frame (for the running spinner)
    animation_frame: usize,
}

impl Ui {
    /// Create a new UI controller.
    pub fn new(numerals: Numerals) -> Self {
        Self {
            state: ViewState::Timer,
            show_help: false,
            theme: Theme::default(),
            numerals,
            log_view: TaskLogView::new(),
            touched: false,
            animation_frame: 0,
        }
    }

    /// Get the current view state.
    pub fn current_view(&self) -> ViewState {
        self.state
    }

    pub fn navigate_to(&mut self, view: ViewState) {
        self.state = view;
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Toggle help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Forget that the title field was touched, hiding its validation message.
    pub fn reset_touched(&mut self) {
        self.touched = false;
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: KeyEvent, timer: &TaskTimer) -> UpdateKind {
        // Global shortcuts first
        match key.code {
            KeyCode::F(1) => return UpdateKind::ToggleHelp,
            KeyCode::Esc if self.show_help => return UpdateKind::ToggleHelp,
            KeyCode::Tab | KeyCode::BackTab => {
                self.state = match self.state {
                    ViewState::Timer => ViewState::Log,
                    ViewState::Log => ViewState::Timer,
                };
                return UpdateKind::Other;
            }
            _ => {}
        }

        match self.state {
            ViewState::Timer => self.handle_timer_input(key),
            ViewState::Log => self.handle_log_input(key, timer),
        }
    }

    /// Update animation frames for UI elements
    pub fn update_animations(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % 4;
    }

    /// Render the UI.
    pub fn render(&self, frame: &mut Frame, timer: &TaskTimer, confetti: &SharedConfetti) {
        let area = frame.size();
        if area.height < 2 {
            return;
        }
        let main_area = Rect::new(area.x, area.y, area.width, area.height - 1);

        match self.state {
            ViewState::Timer => TimerView::render(
                frame,
                main_area,
                timer,
                &self.theme,
                self.numerals,
                self.touched,
                self.animation_frame,
            ),
            ViewState::Log => self.log_view.render(frame, main_area, timer.log(), &self.theme, self.numerals),
        }

        // Render help overlay if active (always on top)
        if self.show_help {
            HelpView::render(frame, main_area, &self.theme, &self.state);
        }

        confetti.with(|c| frame.render_widget(ConfettiOverlay::new(c), main_area));

        self.render_status_line(frame, area, timer);
    }

    // Private methods for input handling

    fn handle_timer_input(&mut self, key: KeyEvent) -> UpdateKind {
        match key.code {
            KeyCode::Esc => UpdateKind::Quit,
            KeyCode::Enter => {
                self.touched = true;
                UpdateKind::Submit
            }
            KeyCode::Backspace => {
                self.touched = true;
                UpdateKind::Backspace
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.touched = true;
                UpdateKind::Input(c)
            }
            _ => UpdateKind::Other,
        }
    }

    fn handle_log_input(&mut self, key: KeyEvent, timer: &TaskTimer) -> UpdateKind {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => UpdateKind::Quit,
            _ => {
                self.log_view.handle_key_event(key, timer.log().len());
                UpdateKind::Other
            }
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, timer: &TaskTimer) {
        // Create a status line at the bottom of the screen
        let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

        let status = if timer.is_running() {
            format!(
                "RUNNING {} {}",
                format_elapsed(timer.elapsed(), self.numerals),
                timer.input().value()
            )
        } else {
            "IDLE".to_string()
        };
        let storage = if timer.is_persistent() { "saved" } else { "not saved" };

        let status_text = format!(
            "{} | Tasks: {} ({}) | Press F1 for help",
            status,
            self.numerals.localize(&timer.log().len().to_string()),
            storage
        );

        let status_style = if timer.is_running() {
            self.theme.status_running
        } else {
            self.theme.status_idle
        };

        let status_widget = Paragraph::new(status_text).style(status_style);
        frame.render_widget(status_widget, status_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Confetti, Silent};
    use crate::state::{ColorAssigner, ManualTicker, Palette, RngSource};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rstest::rstest;

    fn timer() -> TaskTimer {
        TaskTimer::new(
            ColorAssigner::new(Palette::basic(), Box::new(RngSource::seeded(3))),
            Box::new(ManualTicker::new()),
            Box::new(Silent),
            Box::new(SharedConfetti::default()),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[rstest]
    #[case(KeyCode::Enter, UpdateKind::Submit)]
    #[case(KeyCode::Backspace, UpdateKind::Backspace)]
    #[case(KeyCode::Char('x'), UpdateKind::Input('x'))]
    #[case(KeyCode::Esc, UpdateKind::Quit)]
    #[case(KeyCode::F(1), UpdateKind::ToggleHelp)]
    fn timer_view_keys(#[case] code: KeyCode, #[case] expected: UpdateKind) {
        let mut ui = Ui::new(Numerals::Western);
        assert_eq!(ui.handle_key_event(key(code), &timer()), expected);
    }

    #[test]
    fn control_chars_are_not_typed() {
        let mut ui = Ui::new(Numerals::Western);
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(ui.handle_key_event(ctrl_a, &timer()), UpdateKind::Other);
    }

    #[test]
    fn tab_switches_views_and_q_quits_log() {
        let mut ui = Ui::new(Numerals::Western);
        let timer = timer();

        assert_eq!(ui.handle_key_event(key(KeyCode::Tab), &timer), UpdateKind::Other);
        assert_eq!(ui.current_view(), ViewState::Log);
        assert_eq!(ui.handle_key_event(key(KeyCode::Char('q')), &timer), UpdateKind::Quit);

        ui.handle_key_event(key(KeyCode::Tab), &timer);
        assert_eq!(ui.current_view(), ViewState::Timer);
        assert_eq!(ui.handle_key_event(key(KeyCode::Char('q')), &timer), UpdateKind::Input('q'));
    }

    #[test]
    fn esc_closes_help_before_quitting() {
        let mut ui = Ui::new(Numerals::Western);
        ui.toggle_help();
        assert_eq!(ui.handle_key_event(key(KeyCode::Esc), &timer()), UpdateKind::ToggleHelp);
    }

    #[test]
    fn renders_running_clock() {
        let mut timer = timer();
        timer.set_title("draft");
        timer.start();
        for _ in 0..61 {
            timer.tick();
        }

        let ui = Ui::new(Numerals::EasternArabic);
        let confetti = SharedConfetti::new(Confetti::new(StdRng::seed_from_u64(0)));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui.render(f, &timer, &confetti)).unwrap();

        let screen = screen(&terminal);
        assert!(screen.contains("٠١:٠١"), "{screen}");
        assert!(screen.contains("RUNNING"), "{screen}");
        assert!(screen.contains("draft"), "{screen}");
    }

    #[test]
    fn renders_validation_message_once_touched() {
        let mut timer = timer();
        timer.set_title("ab");
        let mut ui = Ui::new(Numerals::Western);
        let confetti = SharedConfetti::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| ui.render(f, &timer, &confetti)).unwrap();
        assert!(!screen(&terminal).contains("at least 3"));

        ui.handle_key_event(key(KeyCode::Enter), &timer);
        terminal.draw(|f| ui.render(f, &timer, &confetti)).unwrap();
        assert!(screen(&terminal).contains("at least 3 characters"));
    }

    #[test]
    fn renders_log_newest_first() {
        let mut timer = timer();
        for title in ["first task", "second task"] {
            timer.set_title(title);
            timer.start();
            timer.stop();
        }

        let mut ui = Ui::new(Numerals::Western);
        ui.navigate_to(ViewState::Log);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| ui.render(f, &timer, &SharedConfetti::default()))
            .unwrap();

        let screen = screen(&terminal);
        let first = screen.find("first task").unwrap();
        let second = screen.find("second task").unwrap();
        assert!(second < first);
        assert!(screen.contains("Tasks (2 total)"));
    }
}
