//! `bookstock` — terminal UI for managing store inventory.
//!
//! # Usage
//!
//! ```
//! bookstock --url http://localhost:3001 --user manager --password manager123
//! bookstock --mock                 # run against the in-process fixtures
//! bookstock --config ~/.config/bookstock/config.toml
//! ```

mod app;
mod ui;

use std::{io, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use app::App;
use bookstock_client::{HttpConfig, HttpGateway};
use bookstock_core::{gateway::Gateway, session::Credentials};
use bookstock_mock::MockGateway;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "bookstock", about = "Terminal UI for Bookstock inventory")]
struct Args {
  /// Path to a TOML config file (url, username, password, mock).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the API server (default: http://localhost:3001).
  #[arg(long, env = "BOOKSTOCK_URL")]
  url: Option<String>,

  /// Username to log in with at startup.
  #[arg(long, env = "BOOKSTOCK_USER")]
  user: Option<String>,

  /// Password for `--user`.
  #[arg(long, env = "BOOKSTOCK_PASSWORD")]
  password: Option<String>,

  /// Run against the in-process fixture backend instead of HTTP.
  #[arg(long)]
  mock: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
  #[serde(default)]
  mock:     bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let username = args
    .user
    .or_else(|| (!file_cfg.username.is_empty()).then(|| file_cfg.username.clone()));
  let password = args
    .password
    .or_else(|| (!file_cfg.password.is_empty()).then(|| file_cfg.password.clone()));
  let credentials = match (username, password) {
    (Some(username), Some(password)) => Some(Credentials { username, password }),
    _ => None,
  };

  // The backend is a configuration choice: in-process fixtures or HTTP.
  if args.mock || file_cfg.mock {
    run(MockGateway::seeded(), credentials).await
  } else {
    let base_url = args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3001".to_string());
    let gateway = HttpGateway::new(HttpConfig { base_url, ..Default::default() })
      .context("building HTTP client")?;
    run(gateway, credentials).await
  }
}

async fn run<G: Gateway>(gateway: G, credentials: Option<Credentials>) -> Result<()> {
  let mut app = App::new(Arc::new(gateway));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Establish the session and load initial data.
  if let Some(credentials) = credentials {
    app.login(credentials).await;
  }
  let load_result = app.load_stores().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<G: Gateway>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<G>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
