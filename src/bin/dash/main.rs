//! Newsdeck Dashboard - Operator console
//!
//! Terminal control panel for the news ingestion/classification backend:
//! - Toggle the polling and classifying loops
//! - Reset computed classifications
//! - Edit backend settings (LLM endpoint, API keys, router weight)
//! - Watch recently ingested articles
//!
//! Usage:
//!   newsdeck-dash [OPTIONS]
//!
//! Examples:
//!   newsdeck-dash                          # Connect to localhost:8000
//!   newsdeck-dash --api http://backend:8000
//!   newsdeck-dash --refresh 500            # Faster refresh (ms)

mod colors;
mod panels;
mod widgets;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use newsdeck::{BackendClient, ConsoleConfig, Freshness, SettingsSession, StatusSync};
use panels::{ArticlesPanel, SettingsPanel, StatusPanel};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::{io, path::PathBuf, time::Duration};
use tokio::time::interval;
use tracing::{debug, error, Level};
use tracing_subscriber::EnvFilter;

/// Dashboard CLI arguments
#[derive(Parser)]
#[command(name = "newsdeck-dash")]
#[command(about = "Operator console for the news ingestion/classification backend")]
#[command(version)]
struct Args {
    /// Backend base URL (overrides config)
    #[arg(long)]
    api: Option<String>,

    /// Refresh interval in milliseconds (overrides config)
    #[arg(long)]
    refresh: Option<u64>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Application state
struct App {
    /// Protocol state
    status: StatusSync,
    settings: SettingsSession,
    client: BackendClient,

    /// Panel instances
    status_panel: StatusPanel,
    articles_panel: ArticlesPanel,
    settings_panel: SettingsPanel,
}

impl App {
    fn new(client: BackendClient) -> Self {
        Self {
            status: StatusSync::new(client.clone()),
            settings: SettingsSession::new(),
            client,
            status_panel: StatusPanel::new(),
            articles_panel: ArticlesPanel::new(),
            settings_panel: SettingsPanel::new(),
        }
    }

    /// Refresh status and articles from the backend
    async fn update_state(&mut self) {
        self.status.refresh().await;
        self.status_panel.update(self.status.snapshot().await);

        // Article reads share the status failure semantics: keep the last
        // list, log, carry on.
        match self.client.fetch_articles(self.articles_panel.filter()).await {
            Ok(articles) => self.articles_panel.update(articles),
            Err(e) => debug!("failed to fetch articles: {}", e),
        }
        match self.client.classification_counts().await {
            Ok(counts) => self.articles_panel.update_backlog(counts.unclassified_count),
            Err(e) => debug!("failed to fetch backlog count: {}", e),
        }
    }

    /// Handle keyboard input. Returns true to quit.
    async fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.settings.is_open() {
            match key {
                KeyCode::Esc => self.settings.cancel(),
                KeyCode::Enter => {
                    // Failed saves keep the drawer open with the error shown
                    let _ = self.settings.save(&self.client).await;
                }
                other => {
                    if let Some(form) = self.settings.form_mut() {
                        self.settings_panel.handle_key(other, form);
                    }
                }
            }
            return false;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('p') => {
                let running = self.status.snapshot().await.status.is_polling;
                self.status.set_polling(!running).await;
                self.status_panel.update(self.status.snapshot().await);
            }
            KeyCode::Char('c') => {
                let running = self.status.snapshot().await.status.is_classifying;
                self.status.set_classifying(!running).await;
                self.status_panel.update(self.status.snapshot().await);
            }
            KeyCode::Char('r') => {
                self.status.reset_classifications().await;
                self.status_panel.update(self.status.snapshot().await);
            }
            KeyCode::Char('s') => {
                self.settings_panel.reset_focus();
                self.settings.open(&self.client).await;
            }
            KeyCode::Char('f') => {
                let filter = self.articles_panel.cycle_filter();
                match self.client.fetch_articles(filter).await {
                    Ok(articles) => self.articles_panel.update(articles),
                    Err(e) => debug!("failed to fetch articles: {}", e),
                }
            }
            _ => {}
        }
        false
    }

    fn connected(&self) -> bool {
        self.status_panel.snapshot().freshness == Freshness::Live
    }
}

/// How long the render loop waits between input polls when no refresh
/// is due.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Apply a batch of input events in order. Returns true to quit.
async fn handle_events(app: &mut App, events: Vec<Event>) -> bool {
    for event in events {
        if let Event::Key(key) = event {
            if app.handle_key(key.code).await {
                return true;
            }
        }
    }
    false
}

/// Open the dashboard log file for appending.
fn open_log(path: &str) -> Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path))
}

/// Drawer rect anchored to the right edge
fn drawer_area(area: Rect) -> Rect {
    let width = area.width.min(48);
    let height = area.height.min(10);
    Rect {
        x: area.width.saturating_sub(width),
        y: 1,
        width,
        height,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConsoleConfig::load_from(args.config.as_deref())?;
    if let Some(api) = args.api {
        config.api_url = api;
    }
    if let Some(refresh) = args.refresh {
        config.refresh_ms = refresh;
    }

    // Initialize logging (to file, not stderr - the terminal is the UI)
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::new(format!(
        "newsdeck={0},newsdeck_dash={0}",
        level.as_str().to_lowercase()
    ));
    // Open the log sink before the terminal enters raw mode; a bad path
    // fails the run cleanly instead of panicking mid-draw.
    let log_file = open_log(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(log_file))
        .init();

    debug!("Dashboard v{} starting...", env!("CARGO_PKG_VERSION"));
    debug!("API URL: {}", config.api_url);

    let client = BackendClient::with_timeout(
        &config.api_url,
        Duration::from_secs(config.http_timeout_secs),
    )?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let mut tick = interval(Duration::from_millis(config.refresh_ms.max(100)));

    let result = run_app(&mut terminal, &mut app, &mut tick).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("Error: {:?}", err);
        return Err(err);
    }

    debug!("Dashboard exiting cleanly");
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: &mut tokio::time::Interval,
) -> Result<()> {
    // Initial state refresh so toggles show backend truth immediately
    app.update_state().await;
    debug!("Initial state refresh complete");

    loop {
        terminal.draw(|f| {
            let main_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(8),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ])
                .split(f.area());

            // Header
            let title = if app.connected() {
                "Newsdeck [Connected]"
            } else {
                "Newsdeck [Disconnected]"
            };
            let header = Paragraph::new(title)
                .style(Style::default().fg(if app.connected() {
                    Color::Green
                } else {
                    Color::Red
                }))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, main_chunks[0]);

            app.status_panel.render(f, main_chunks[1]);
            app.articles_panel.render(f, main_chunks[2]);

            // Footer with keyboard shortcuts
            let footer_text = if app.settings.is_open() {
                "Settings: type to edit | Tab next | Enter save | Esc cancel"
            } else {
                "p poll | c classify | r reset | f filter | s settings | q quit"
            };
            let footer = Paragraph::new(footer_text).style(Style::default().fg(Color::Gray));
            f.render_widget(footer, main_chunks[3]);

            // Settings drawer overlays everything else while open
            if app.settings.is_open() {
                app.settings_panel
                    .render(f, drawer_area(f.area()), &app.settings);
            }
        })?;

        // Drain everything already queued; typing into the settings form
        // must not be limited to one key per refresh tick.
        let mut pending = Vec::new();
        while event::poll(Duration::ZERO)? {
            pending.push(event::read()?);
        }
        if handle_events(app, pending).await {
            return Ok(());
        }

        tokio::select! {
            _ = tick.tick() => {
                app.update_state().await;
            }
            _ = tokio::time::sleep(INPUT_POLL_INTERVAL) => {}
        }
    }
}
