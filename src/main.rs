use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oilwatch::api::{ApiClient, MarketApi};
use oilwatch::config::{AppConfig, fetch_config};
use oilwatch::routes::{Navigation, Route};
use oilwatch::runtime::Runtime;
use oilwatch::tui::{
    self, App, Message, Tui, restore_terminal, set_title, setup_terminal, spawn_event_reader,
    spawn_tick_timer,
};
use oilwatch::{OilwatchError, Result};

/// UI tick period in milliseconds.
const TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = fetch_config()?;
    init_tracing(app_config.log_file.as_deref())?;

    let route = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path)?,
        None => Route::Landing,
    };

    let api: Arc<dyn MarketApi> = Arc::new(ApiClient::new(app_config.api.base_url.clone())?);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, api, &app_config, &route).await;
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!("exiting with error: {e}");
    }
    result
}

/// Sends tracing output to `log_file`, or drops it when there is none.
///
/// The terminal belongs to the UI, so nothing is written to stdout.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| OilwatchError::Io(format!("failed to open {}: {e}", path.display())))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

/// Drives the UI until the user quits.
async fn run(
    terminal: &mut Tui,
    api: Arc<dyn MarketApi>,
    app_config: &AppConfig,
    route: &Route,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);

    let ctrl_c_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c_tx.send(Message::Quit);
        }
    });

    let size = terminal
        .size()
        .map_err(|e| OilwatchError::Io(e.to_string()))?;
    let mut app = App::new(route, app_config.site_url.clone(), (size.width, size.height));
    let mut runtime = Runtime::new(api, tx, app_config.api.refresh_interval);

    info!(base_url = %app_config.api.base_url, %route, "starting oilwatch");
    let boot = app.boot();
    app.page_id = Some(runtime.start_page(boot));

    let mut title = String::new();
    loop {
        let window_title = app.window_title();
        if window_title != title {
            set_title(terminal, &window_title)?;
            title = window_title;
        }

        terminal
            .draw(|frame| tui::render(frame, &app))
            .map_err(|e| OilwatchError::Io(e.to_string()))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        let effects = tui::update(&mut app, message);
        if let Some(navigation) = runtime.dispatch(effects) {
            follow(&mut app, &mut runtime, navigation);
        }

        if app.should_quit {
            break;
        }
    }

    runtime.shutdown();
    Ok(())
}

/// Switches pages, or shows an external link in the status bar.
fn follow(app: &mut App, runtime: &mut Runtime, navigation: Navigation) {
    match navigation {
        Navigation::Page(route) => {
            let boot = app.open(&route);
            app.page_id = Some(runtime.start_page(boot));
        }
        Navigation::External(url) => {
            info!(%url, "external link opened");
            app.notify(format!("Open in browser: {url}"));
        }
    }
}
