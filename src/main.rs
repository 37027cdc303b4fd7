mod app;
mod check;
mod config;
mod error;
mod event;
mod github;
mod report;
#[cfg(test)]
mod test_utils;
mod ui;
mod watcher;

use app::App;
use check::Checker;
use chrono::{FixedOffset, Utc};
use clap::Parser;
use config::{Config, SourceKind};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::AppEvent;
use futures::StreamExt;
use github::{client::GitHubClient, source::Source};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Parser)]
#[command(name = "rollcall", about = "Who has pushed a commit to GitHub today?")]
struct Cli {
    #[arg(long, short, help = "Path to config file")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, help = "Contribution source to query")]
    source: Option<SourceKind>,

    #[arg(long, allow_hyphen_values = true, help = "Fixed UTC offset for \"today\", e.g. +09:00")]
    offset: Option<String>,

    #[arg(long = "user", short = 'u', value_name = "LOGIN", help = "Check these logins instead of the configured roster")]
    users: Vec<String>,

    #[arg(long, help = "Run a single check, print the result and exit")]
    once: bool,

    #[arg(long, requires = "once", help = "Print the --once result as JSON")]
    json: bool,

    #[arg(long, help = "Print the effective configuration and exit")]
    print_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(ref offset) = self.offset {
            config.utc_offset = offset.clone();
        }
        if !self.users.is_empty() {
            config.participants = self.users.clone();
        }
    }
}

type SharedChecker = Arc<Checker<Source>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.clone());
    cli.apply(&mut config);

    if cli.print_config {
        print!("{}", config.to_toml_redacted()?);
        return Ok(());
    }

    let offset = config.offset()?;
    if config.token().is_none() {
        eprintln!("warning: GITHUB_TOKEN is not set, GitHub will reject most requests");
    }

    let client = GitHubClient::new(config.token(), config.api_base.as_deref())?;
    let checker = Arc::new(build_checker(&config, client.clone(), offset));

    if cli.once {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
        run_once(&checker, cli.json).await?;
        return Ok(());
    }

    run_tui(&config, checker, client).await
}

fn build_checker(config: &Config, client: GitHubClient, offset: FixedOffset) -> Checker<Source> {
    let timeout = (config.request_timeout_secs > 0)
        .then(|| Duration::from_secs(config.request_timeout_secs));
    Checker::new(
        Source::new(config.source, client),
        config.participants.clone(),
        offset,
    )
    .with_concurrency(config.max_concurrency)
    .with_timeout(timeout)
}

async fn run_once(checker: &SharedChecker, json: bool) -> error::Result<()> {
    let snapshot = checker.run_check(Utc::now()).await;
    let mut out = std::io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report::to_json(&snapshot))?)?;
    } else {
        write!(out, "{}", report::render_text(&snapshot))?;
    }
    Ok(())
}

async fn run_tui(
    config: &Config,
    checker: SharedChecker,
    client: GitHubClient,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(
        checker.roster().to_vec(),
        config.source,
        checker.offset(),
    );

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let poller: Option<JoinHandle<()>> = config.auto_refresh_secs.map(|secs| {
        let poll_tx = tx.clone();
        tokio::spawn(async move {
            watcher::poll::start_refresh_poller(poll_tx, secs).await;
        })
    });

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    loop {
        if app.begin_check() {
            spawn_check(checker.clone(), client.clone(), tx.clone());
        }

        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };
        app.handle_event(first);
        while let Ok(pending) = rx.try_recv() {
            app.handle_event(pending);
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(handle) = poller {
        handle.abort();
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn spawn_check(checker: SharedChecker, client: GitHubClient, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let snapshot = checker.run_check(Utc::now()).await;
        let rate_limit = client.rate_limit().await;
        let _ = tx.send(AppEvent::CheckFinished {
            snapshot,
            rate_limit,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "rollcall", "--source", "events", "--offset", "-05:00", "-u", "alice", "-u", "bob",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.source, SourceKind::Events);
        assert_eq!(config.utc_offset, "-05:00");
        assert_eq!(config.participants, vec!["alice", "bob"]);
    }

    #[test]
    fn json_requires_once() {
        assert!(Cli::try_parse_from(["rollcall", "--json"]).is_err());
        assert!(Cli::try_parse_from(["rollcall", "--once", "--json"]).is_ok());
    }
}
