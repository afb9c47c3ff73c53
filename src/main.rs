mod cli;
mod error;
mod log;
mod terminal;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use crate::terminal::{HELP, Input, PrintOpener, TerminalRenderer};
use blobnav_browser::{Navigator, StalePolicy};
use blobnav_config::Config;
use blobnav_listing::{Resolved, build_trail, resolve};
use blobnav_storage::Pagination;
use blobnav_storage::backend::AzureBackend;
use clap::Parser;
use exn::{OptionExt, ResultExt};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    log::init(cli.verbose, &config.log_level)?;
    tracing::debug!(?config, "Configuration loaded");

    let pagination = match cli.single_page {
        true => Pagination::SinglePage,
        false => config.pagination,
    };
    match cli.command {
        Command::Trail { url } => {
            let resolved = endpoint(url, &config)?;
            println!("{}", terminal::format_trail(&build_trail(resolved.address.container(), &resolved.initial_path)));
            Ok(())
        },
        Command::Ls { url, path } => {
            let navigator = navigator(endpoint(url, &config)?, pagination, config.stale_policy, &config)?;
            let outcome = match path {
                Some(path) => navigator.jump_to(&path).await,
                None => navigator.connect().await,
            };
            outcome.or_raise(|| ErrorKind::Navigate)?;
            Ok(())
        },
        Command::Browse { url, latest_wins } => {
            let policy = match latest_wins {
                true => StalePolicy::LatestRequestWins,
                false => config.stale_policy,
            };
            let navigator = navigator(endpoint(url, &config)?, pagination, policy, &config)?;
            browse(&navigator).await
        },
    }
}

/// Resolve the endpoint from the command line, falling back to the configured one.
fn endpoint(url: Option<String>, config: &Config) -> Result<Resolved> {
    let raw = url.or_else(|| config.endpoint.clone()).ok_or_raise(|| ErrorKind::NoEndpoint)?;
    let resolved = resolve(&raw).or_raise(|| ErrorKind::Resolve)?;
    tracing::debug!(
        account = resolved.address.account(),
        container = resolved.address.container(),
        path = %resolved.initial_path,
        "Resolved endpoint"
    );
    Ok(resolved)
}

fn navigator(
    resolved: Resolved,
    pagination: Pagination,
    policy: StalePolicy,
    config: &Config,
) -> Result<Navigator<TerminalRenderer>> {
    let backend = AzureBackend::new(resolved.address.clone(), pagination, Some(config.timeout()))
        .or_raise(|| ErrorKind::Backend)?;
    Ok(Navigator::new(resolved, Arc::new(backend), TerminalRenderer::new()).with_stale_policy(policy))
}

/// Interactive loop over stdin. Failed navigations have already been shown
/// by the renderer and leave the view where it was, so they don't end the
/// session.
async fn browse(navigator: &Navigator<TerminalRenderer>) -> Result<()> {
    if let Err(err) = navigator.connect().await {
        tracing::debug!(error = ?err, "Initial listing failed");
    }
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await.or_raise(|| ErrorKind::Input)?;
        stdout.flush().await.or_raise(|| ErrorKind::Input)?;
        let Some(line) = lines.next_line().await.or_raise(|| ErrorKind::Input)? else {
            return Ok(());
        };
        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(message) => {
                eprintln!("{message}");
                continue;
            },
        };
        let result = match input {
            Input::Nothing => continue,
            Input::Quit => return Ok(()),
            Input::Help => {
                println!("{HELP}");
                continue;
            },
            Input::List => {
                println!("{}", terminal::format_trail(&navigator.trail()));
                for node in navigator.nodes() {
                    println!("{}", terminal::format_node(&node));
                }
                continue;
            },
            Input::Descend(name) => match navigator.child(&name).filter(|node| node.is_folder()) {
                Some(folder) => navigator.descend_into(&folder.full_path).await,
                None => {
                    eprintln!("no folder named {name}");
                    continue;
                },
            },
            Input::Ascend => navigator.ascend().await,
            Input::Jump(index) => match navigator.trail().get(index) {
                Some(crumb) => navigator.jump_to(&crumb.path).await,
                None => {
                    eprintln!("no breadcrumb {index}");
                    continue;
                },
            },
            Input::Refresh => navigator.refresh().await,
            Input::Open(name) => {
                match navigator.child(&name) {
                    Some(node) => {
                        if let Err(err) = navigator.open(&node, &PrintOpener) {
                            eprintln!("{}", *err);
                        }
                    },
                    None => eprintln!("no file named {name}"),
                }
                continue;
            },
        };
        if let Err(err) = result {
            tracing::debug!(error = ?err, "Navigation failed");
        }
    }
}
