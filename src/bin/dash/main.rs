//! Talkboard Dashboard - interactive talk analytics
//!
//! Loads the talk table once, then drives the reactive engine from
//! keyboard input:
//! - Top Talks: ranked stacked bars, views or view-like ratio
//! - Top Speakers: per-author rollups with bubble sizes
//! - Time Series: uploads and views per month or year
//! - Talks by Speaker: one author's talks as a linked table
//!
//! Usage:
//!   talkboard-dash [OPTIONS]
//!
//! Examples:
//!   talkboard-dash --data data/ted-talks.csv
//!   talkboard-dash --refresh 100      # Faster redraw (ms)

mod app;
mod render;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use std::{io, sync::Arc, time::Duration};
use talkboard_core::{Dataset, Orchestrator, PanelId, Settings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Dashboard CLI arguments
#[derive(Parser)]
#[command(name = "talkboard-dash")]
#[command(about = "Interactive analytics dashboard over a table of recorded talks")]
#[command(version)]
struct Args {
    /// Path to the delimited talk data (overrides talkboard.toml)
    #[arg(long)]
    data: Option<String>,

    /// Redraw poll interval in milliseconds (overrides talkboard.toml)
    #[arg(long)]
    refresh: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Log to a file, not stderr - the terminal belongs to the UI
    let filter = EnvFilter::new(format!("talkboard={0},talkboard_core={0}", args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("/tmp/talkboard-dash.log")
                .unwrap()
        })
        .init();

    let mut settings = Settings::load().context("loading talkboard.toml")?;
    if let Some(data) = args.data {
        settings.data_path = data;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_ms = refresh;
    }

    let dataset = Dataset::load_csv_path(&settings.data_path)
        .with_context(|| format!("loading talk data from {}", settings.data_path))?;
    debug!(records = dataset.len(), "dataset ready");

    let orchestrator = Orchestrator::new(Arc::new(dataset));
    let mut app = App::new(orchestrator);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, settings.refresh_ms);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    refresh_ms: u64,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Percentage(34),
                    Constraint::Percentage(36),
                    Constraint::Percentage(30),
                    Constraint::Length(1),
                ])
                .split(f.area());

            let header = Paragraph::new("TED Talks").style(Style::default().fg(Color::Red));
            f.render_widget(header, chunks[0]);

            // Top row: talks and speakers side by side
            let top = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(chunks[1]);

            for (panel, area) in [
                (PanelId::TopTalks, top[0]),
                (PanelId::TopSpeakers, top[1]),
                (PanelId::TimeSeries, chunks[2]),
                (PanelId::TalksBySpeaker, chunks[3]),
            ] {
                if let Some(update) = app.result(panel) {
                    render::render_panel(
                        f,
                        area,
                        panel.name(),
                        app.focused() == panel,
                        &update.result,
                    );
                }
            }

            let footer = Paragraph::new(format!(
                "{} | Tab focus  q quit",
                app.status_line()
            ))
            .style(Style::default().fg(Color::Gray));
            f.render_widget(footer, chunks[4]);
        })?;

        if event::poll(Duration::from_millis(refresh_ms))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
