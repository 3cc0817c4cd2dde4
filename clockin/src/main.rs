mod logging;

use anyhow::Result;
use clap::Parser;
use clockin_core::{
    Kiosk, backend,
    config::{self, BackendKind, Config},
};
use clockin_tui::{KioskOptions, Theme};
use std::{path::PathBuf, process::ExitCode, time::Instant};

#[derive(Parser)]
#[command(version, about = "Staff attendance kiosk for the terminal")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Attendance backend to use (http or memory)
    #[arg(long)]
    backend: Option<BackendKind>,

    /// Base URL of the attendance API, e.g. http://localhost:5000/api
    #[arg(long)]
    api_url: Option<String>,

    /// Log level written to the log file
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Cli {
    fn log_level(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level '{}'", self.log_level))
    }

    /// Fold command-line overrides into the loaded config
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(kind) = self.backend {
            config.backend.kind = kind;
        }
        if let Some(url) = &self.api_url {
            config.backend.base_url.clone_from(url);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            eprintln!("Error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    logging::setup_logging(cli.log_level()?)?;

    let backend = backend::from_config(&config.backend);
    let theme = Theme::from_config(&config.theme);
    let options = KioskOptions::from_config(&config.kiosk);
    let mut kiosk =
        Kiosk::new(Instant::now(), chrono::Local::now()).with_auto_reset(config.kiosk.auto_reset());

    let mut terminal = if should_disable_alt_screen() {
        // Inline viewport keeps drawing in the primary screen buffer, which makes
        // tmux capture-pane output usable for automation/debugging.
        ratatui::init_with_options(ratatui::TerminalOptions {
            viewport: ratatui::Viewport::Inline(24),
        })
    } else {
        ratatui::init()
    };
    let result = clockin_tui::run(&mut terminal, &mut kiosk, &backend, &theme, &options);
    ratatui::restore();
    log::info!("kiosk closed");
    result
}

fn should_disable_alt_screen() -> bool {
    match std::env::var("CLOCKIN_NO_ALT_SCREEN") {
        Ok(value) => {
            let value = value.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        Err(_) => false,
    }
}
