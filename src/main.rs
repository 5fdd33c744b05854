//! kaigi-feeder — the DroidKaigi feed (blog posts, DroidKaigi.fm episodes
//! and session recordings) in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  FetchMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │  (task)  │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!   │    │                     ▲
//!   │    │                     │ handle_key_event()
//!  api/ auth/             ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`model/`** — the `FeedItem` union, filters and user.
//! * **`api/`** — the `FeedApi` trait, the HTTP client and the bundled fake.
//! * **`auth/`** — the `Authenticator` trait and anonymous sign-in.
//! * **`viewmodel/`** — feed, settings and player screen state.
//! * **`fetch`** — runs sign-in + fetch on a tokio task.
//! * **`app`** — owns all state the terminal shows.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`config`** / **`logging`** — TOML config and file-backed tracing.
//! * **`main`** — wires everything together: parse args, set up the terminal,
//!   and run the event loop.

mod api;
mod app;
mod auth;
mod config;
mod error;
mod fetch;
mod input;
mod logging;
mod model;
#[cfg(test)]
mod test_server;
mod ui;
mod viewmodel;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{info, warn};

use api::{FakeFeedApi, FeedApi, HttpFeedApi};
use app::App;
use auth::{Authenticator, FakeAuthenticator, IdentityToolkitAuthenticator};
use config::Config;
use fetch::Backend;

#[derive(Debug, Parser)]
#[command(name = "kaigi-feeder", version, about = "Browse the DroidKaigi feed in your terminal")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Use the bundled sample feed and a local session instead of the network.
    #[arg(long)]
    offline: bool,

    /// Override `api.base_url` from the config file.
    #[arg(long)]
    base_url: Option<String>,
}

// ---------------------------------------------------------------------------
// RAII terminal guard — cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Pick the feed client and identity provider for this run.
fn build_backend(config: &Config, offline: bool) -> Result<Backend> {
    if offline {
        info!("offline mode: bundled feed, local session");
        return Ok(Backend {
            api: Arc::new(FakeFeedApi::new().context("decoding bundled feed")?),
            auth: Some(Arc::new(FakeAuthenticator::new())),
        });
    }

    let auth: Option<Arc<dyn Authenticator>> = match &config.auth.api_key {
        Some(key) => Some(Arc::new(
            IdentityToolkitAuthenticator::new(&config.auth.endpoint, key, config.api.timeout)
                .context("building identity client")?,
        )),
        None => {
            warn!("no auth.api_key configured; fetching without a session");
            None
        }
    };

    let mut http = HttpFeedApi::new(&config.api.base_url, &config.api.user_agent, config.api.timeout)
        .context("building feed client")?;
    if let Some(auth) = &auth {
        http = http.with_authenticator(auth.clone());
    }
    info!(url = http.url(), "using feed backend");
    let api: Arc<dyn FeedApi> = Arc::new(http);

    Ok(Backend { api, auth })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(base_url) = cli.base_url {
        config.set_base_url(base_url).context("applying --base-url")?;
    }

    logging::init_logging(&config.logging.level, &config.logging.file)?;
    info!(config = %config_path.display(), offline = cli.offline, "starting");

    let backend = build_backend(&config, cli.offline)?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    install_panic_hook();
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(config.ui.language);

    // -- initial fetch -------------------------------------------------------
    app.feed.begin_load();
    fetch::spawn(backend.clone(), tx.clone());

    // -- main event loop -----------------------------------------------------
    // Each tick:
    //   1. Drain any messages from the fetch task.
    //   2. Start a retry fetch if the user asked for one.
    //   3. Render the UI.
    //   4. Poll for keyboard input (up to one tick).
    loop {
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        if app.take_reload_request() && app.feed.begin_load() {
            app.status = "Retrying…".into();
            fetch::spawn(backend.clone(), tx.clone());
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(config.ui.tick)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("exiting");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
