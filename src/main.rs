mod api;
mod app;
mod config;
mod error;
mod events;
mod host;
mod logging;
mod models;
mod panel;
mod protocol;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use api::AssistClient;
use app::App;
use events::AppEvent;
use host::{ExtensionContext, ViewRegistry};
use panel::{ChannelSink, WebviewView};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;
    let config_dir = config::get_config_dir()?;
    let _log_guard = logging::init(&config_dir.join("logs"), &config.log_level)?;

    let client = AssistClient::new(&config.service_url, config.request_timeout)?;
    tracing::info!(service_url = client.base_url(), "starting planto");

    // Create channel for async events
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    // Activate and resolve the panel the way an editor host would
    let mut registry = ViewRegistry::new();
    let mut context = ExtensionContext::new(config_dir);
    host::activate(&mut context, &mut registry, client.clone())?;

    let mut view = WebviewView::new(Arc::new(ChannelSink::new(tx.clone())));
    registry.resolve(host::VIEW_ID, &mut view)?;
    let markup = view
        .markup
        .clone()
        .context("Panel did not install its markup")?;

    let mut app = App::new(markup, Duration::from_secs(config.notification_secs));

    let probe_tx = tx.clone();
    tokio::spawn(async move {
        let online = client.health_check().await;
        tracing::info!(online, "assist service health check");
        let _ = probe_tx.send(AppEvent::ServiceStatus(online));
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &view, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    context.dispose(&mut registry);
    host::deactivate();

    if let Err(err) = res {
        tracing::error!(error = ?err, "panel exited with an error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ViewMessage(message) => app.apply_view_message(message),
        AppEvent::ErrorNotification(message) => app.notify_error(message),
        AppEvent::ServiceStatus(online) => app.service_online = Some(online),
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    view: &WebviewView,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        app.prune_notifications(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        // Replies and notifications from in-flight dispatches
        while let Ok(app_event) = event_rx.try_recv() {
            handle_app_event(app, app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(message) = app.handle_key(key.code, key.modifiers) {
                        // Fire and forget: the reply arrives later as an AppEvent
                        view.deliver(message);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
