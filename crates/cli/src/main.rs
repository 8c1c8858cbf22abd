mod browser;
mod cli;
mod logging;
mod output;

use std::collections::HashSet;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use buddybot::config::{RunConfig, parse_exclusions};
use buddybot::run::{CancelFlag, Terminal};
use buddybot::{EventSink, RunSummary};

use crate::browser::WebDriverBrowser;
use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match execute(cli).await {
        Ok(summary) => {
            let code = match summary.terminal {
                Terminal::Completed | Terminal::Cancelled => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
        Err(err) => {
            error!(target = "buddybot", error = %err, "run setup failed");
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<RunSummary> {
    let exclusions = load_exclusions(&cli)?;
    let json = cli.json;

    let config = RunConfig {
        identifier: cli.identifier,
        secret: cli.secret,
        keyword: cli.keyword,
        message: cli.message,
        target: cli.target,
        exclusions,
    };

    let (events, mut rx) = EventSink::channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            output::render(&event, json);
        }
    });

    let cancel = CancelFlag::new();
    let signal_task = {
        let cancel = cancel.clone();
        let events = events.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                events.warning("stop requested, finishing the candidate in flight");
                cancel.set();
            }
        })
    };

    let endpoint = cli.webdriver;
    let headless = cli.headless;
    let summary = buddybot::run::run(
        &config,
        move || async move { WebDriverBrowser::launch(&endpoint, headless).await },
        &events,
        &cancel,
    )
    .await;

    signal_task.abort();
    // Wait out the abort so the task's sender clone is dropped and the
    // printer sees the channel close.
    let _ = signal_task.await;
    drop(events);
    printer.await.ok();

    Ok(summary)
}

fn load_exclusions(cli: &Cli) -> anyhow::Result<HashSet<String>> {
    match (&cli.exclude, &cli.exclude_file) {
        (Some(inline), _) => Ok(parse_exclusions(inline)),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading exclusion list {}", path.display()))?;
            Ok(parse_exclusions(&text))
        }
        (None, None) => Ok(HashSet::new()),
    }
}
