use tokio::sync::mpsc;
use tracing::info;

use bookdesk::api::{ApiClient, HttpApi};
use bookdesk::config::{AppConfig, fetch_config};
use bookdesk::models::Asset;
use bookdesk::tui::{Action, App, Message, Tui, event, render, restore_terminal, setup_terminal};
use bookdesk::{BookdeskError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = fetch_config()?;
    init_logging(&config)?;

    let client = HttpApi::new(&config.base_url)?;

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, client, &config).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Drives the single-threaded update loop: terminal input, refresh
/// ticks, and async resolutions all arrive as messages on one channel.
async fn run<C: ApiClient>(terminal: &mut Tui, client: C, config: &AppConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_refresh_timer(tx.clone(), config.refresh_ms);

    let mut app = App::new(Asset::Btc);
    info!(asset = %app.asset, refresh_ms = config.refresh_ms, "starting");

    // Bootstrap fetch; the refresh timer covers every later cycle.
    execute_action(
        Action::FetchBook {
            asset: app.asset,
            generation: app.book_generation,
        },
        &client,
        &tx,
    );

    draw(terminal, &app)?;

    while let Some(message) = rx.recv().await {
        if let Some(action) = event::update(&mut app, message) {
            execute_action(action, &client, &tx);
        }
        if app.should_quit {
            break;
        }
        draw(terminal, &app)?;
    }

    // Dropping rx here cancels the reader and refresh tasks; in-flight
    // resolutions land on a closed channel and are discarded.
    Ok(())
}

/// Spawns the async work for an action and feeds the outcome back into
/// the message channel.
fn execute_action<C: ApiClient>(action: Action, client: &C, tx: &mpsc::UnboundedSender<Message>) {
    match action {
        Action::FetchBook { asset, generation } => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client
                    .fetch_orderbook(asset)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Message::BookFetched { generation, result });
            });
        }
        Action::Submit {
            request,
            origin,
            token,
        } => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client.place_trade(request).await.map_err(|e| e.to_string());
                let _ = tx.send(Message::SubmissionResolved {
                    origin,
                    token,
                    result,
                });
            });
        }
    }
}

fn draw(terminal: &mut Tui, app: &App) -> Result<()> {
    terminal
        .draw(|frame| render(frame, app))
        .map_err(|e| BookdeskError::Io(e.to_string()))?;
    Ok(())
}

/// Routes tracing output to a file when configured; stderr would
/// corrupt the alternate-screen TUI, so logging is off by default.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .map_err(|e| BookdeskError::Config(format!("cannot open log file {path:?}: {e}")))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}
