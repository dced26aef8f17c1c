use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tokio::sync::{mpsc, watch};

use lushfin_monitor::config::Config;
use lushfin_monitor::event::AppEvent;
use lushfin_monitor::poller::Poller;
use lushfin_monitor::stats::rest::StatsRestClient;
use lushfin_monitor::ui::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load config
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure LUSHFIN_API_URL is set in .env or the environment");
            std::process::exit(1);
        }
    };

    // Init tracing (log to file so it doesn't interfere with TUI)
    let log_file = std::fs::File::create("lushfin-monitor.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        base_url = %config.api.base_url,
        poll_interval_secs = config.api.poll_interval_secs,
        overlap = ?config.api.overlap_policy,
        "Starting lushfin-monitor"
    );

    // Channels
    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Stats client + poll scheduler
    let client = Arc::new(StatsRestClient::new(&config.api.base_url)?);
    let mut poller = Poller::new(
        client,
        Duration::from_secs(config.api.poll_interval_secs),
        config.api.overlap_policy,
        app_tx.clone(),
    );
    poller.start();

    // Ctrl+C handler
    let ctrl_c_shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = ctrl_c_shutdown.send(true);
    });

    // TUI main loop
    let mut terminal = ratatui::init();
    let mut app_state = AppState::new(&config.api.base_url);
    app_state.push_log(format!("lushfin-monitor started | {}", config.api.base_url));

    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app_state))?;

        // Handle input (non-blocking with timeout)
        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    tracing::info!("User quit");
                    let _ = shutdown_tx.send(true);
                    break;
                }
            }
        }

        // Drain events from channel
        while let Ok(event) = app_rx.try_recv() {
            app_state.apply(event);
        }

        // Check shutdown
        if *shutdown_rx.borrow() {
            break;
        }
    }

    poller.stop();

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check lushfin-monitor.log for details.");
    Ok(())
}
