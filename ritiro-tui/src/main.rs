//! Terminal dashboard for ritiro: loads an instance configuration, shows the
//! sensor and calendar views, and runs the daily reminder daemon.

mod app;
mod host;
mod input;
mod ui;

use std::{io, path::PathBuf, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ritiro_core::{config::InstanceConfig, context::InstanceContext};
use ritiro_entities::assets::{DEFAULT_ICON, available_icons};
use ritiro_notify::action::{ActionEvent, handle_action_event};
use ritiro_notify::reminder::ACTION_MARK_COLLECTED;

use crate::app::App;
use crate::host::{LogActionPort, LogNotificationPort};
use crate::input::Action;

#[derive(Debug, Parser)]
#[command(about = "Waste pickup dashboard and reminder daemon")]
struct Cli {
    /// Instance configuration file (JSON, as persisted by the host).
    #[arg(short, long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal owns stdout, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // Activation: a broken configuration or icon directory fails loudly here.
    let raw = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("reading config file {}", cli.config.display()))?;
    let config: InstanceConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config file {}", cli.config.display()))?;

    let icons = match config.icon_dir.as_deref() {
        Some(dir) => available_icons(std::path::Path::new(dir))?,
        None => vec![DEFAULT_ICON.to_owned()],
    };

    let instance_id = cli
        .config
        .file_stem()
        .map_or_else(|| "ritiro".to_owned(), |stem| stem.to_string_lossy().into_owned());

    let context = Arc::new(InstanceContext::new(
        instance_id,
        config,
        Arc::new(LogNotificationPort),
        Arc::new(LogActionPort),
    ));

    info!(instance = context.instance_id(), "instance activated");

    let daemon = tokio::spawn(ritiro_notify::daemon::run(Arc::clone(&context)));

    // App state
    let app = App::new(Arc::clone(&context), icons);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    daemon.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::Refresh => {
                    app.refresh();
                    app.status_message = Some("Aggiornato".into());
                }
                Action::MarkCollected => {
                    let action_event = ActionEvent {
                        action: ACTION_MARK_COLLECTED.to_owned(),
                    };
                    handle_action_event(&app.context, &action_event).await;
                    app.status_message = Some("Segnato come fatto".into());
                }
            }
        }
    }

    Ok(())
}
