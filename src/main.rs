mod action;
mod app;
mod auth;
mod browser;
mod diff;
mod error;
mod event;
mod gateway;
mod github;
mod repo;
mod tui;
mod types;
mod ui;
mod viewer;

use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::event::Event;
use crate::github::GitHub;
use crate::tui::EventHandler;
use crate::types::RepoIdentity;

#[derive(Debug, Parser)]
#[command(
    name = "prow",
    version,
    about = "Browse a repository's open pull requests from the terminal"
)]
struct Cli {
    /// Repository to browse as OWNER/NAME (defaults to the repository
    /// detected in the current directory)
    #[arg(short = 'R', long = "repo")]
    repo: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    // Resolving the repository and a token must succeed before the loop
    // starts; either failure aborts with a printed error.
    let repo = repo::resolve(cli.repo.as_deref())?;
    let token = auth::resolve_token()?;
    let github = GitHub::new(token)?;

    let result = run(repo, github).await;

    tui::restore()?;

    result
}

async fn run(repo: RepoIdentity, github: GitHub) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(repo, Arc::new(github), action_tx.clone());

    // Seed the component geometry before the first frame.
    let size = terminal.size()?;
    app.update(Action::Resize(size.width, size.height));

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                match action {
                    // The diff viewer owns the terminal until it exits,
                    // so the handoff happens here rather than in the app.
                    Action::SuspendForDiff(number) => {
                        suspend_for_diff(&mut terminal, &mut app, number)?;
                    }
                    action => app.update(action),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Release the terminal to `gh pr diff`, wait for it, then take the
/// terminal back. Reacquisition happens whether or not the child
/// succeeded; the outcome comes back as a synthetic action so state
/// transitions stay uniform.
fn suspend_for_diff(
    terminal: &mut tui::Tui,
    app: &mut App,
    number: u64,
) -> std::io::Result<()> {
    tui::restore()?;
    let result = diff::show_diff(&app.repo, number);

    *terminal = tui::init()?;
    tui::drain_events();
    terminal.clear()?;

    app.update(Action::DiffFinished(result.err().map(|e| e.to_string())));
    Ok(())
}
