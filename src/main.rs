//! Task Timer - time named tasks from the terminal.
//!
//! Start a task by typing its name and pressing Enter; press Enter again when
//! done. Finished tasks are logged with their duration and a color gradient.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use tasktimer_tui::app::{App, AppConfig};
use tasktimer_tui::event::EventHandler;
use tasktimer_tui::state::{Numerals, PaletteSize};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NumeralsArg {
    Western,
    EasternArabic,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaletteArg {
    Basic,
    Extended,
}

#[derive(Parser, Debug)]
#[command(name = "tasktimer", version, about = "Time named tasks and celebrate finishing them")]
struct Cli {
    /// Keep the task log in memory only
    #[arg(long)]
    no_persist: bool,
    /// Directory holding the saved task log
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Digits used to display times
    #[arg(long, value_enum, default_value = "eastern-arabic")]
    numerals: NumeralsArg,
    /// Palette the task gradients are drawn from
    #[arg(long, value_enum, default_value = "extended")]
    palette: PaletteArg,
    /// Do not play the completion sound
    #[arg(long)]
    mute: bool,
    /// Sound file played when a task completes. Relative paths are also
    /// looked up in the data directory and next to the executable; the
    /// terminal bell rings when the file is not found
    #[arg(long, value_name = "PATH")]
    sound: Option<String>,
    /// Log file (defaults to tasktimer.log in the data directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::new();
        config.persist = !self.no_persist;
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        config.numerals = match self.numerals {
            NumeralsArg::Western => Numerals::Western,
            NumeralsArg::EasternArabic => Numerals::EasternArabic,
        };
        config.palette = match self.palette {
            PaletteArg::Basic => PaletteSize::Basic,
            PaletteArg::Extended => PaletteSize::Extended,
        };
        config.sound_enabled = !self.mute;
        if let Some(sound) = self.sound {
            config.sound_resource = sound;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let log_file = cli.log_file.clone();
    let log_level = cli.log_level.clone();
    let config = cli.into_config();

    init_tracing(log_file.unwrap_or_else(|| config.data_dir.join("tasktimer.log")), &log_level)?;
    tracing::info!(?config, "starting task timer");

    setup_terminal()?;
    let result = run(&config).await;
    restore_terminal()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "task timer exited with an error");
    }
    result
}

async fn run(config: &AppConfig) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new(config.tick_rate());
    let mut app = App::new(config, event_handler.sender());

    app.run(&mut terminal, &mut event_handler).await
}

/// Send logs to a file; the terminal belongs to the UI.
fn init_tracing(path: PathBuf, log_level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("create log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .wrap_err("invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))
        .wrap_err("initialize tracing subscriber")?;
    Ok(())
}

fn setup_terminal() -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    // Leave the alternate screen before color-eyre prints a panic report.
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));

    Ok(())
}

fn restore_terminal() -> Result<()> {
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;

    Ok(())
}
