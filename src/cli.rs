use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Browse a public Azure blob container as a folder tree.
#[derive(Debug, Parser)]
#[command(name = "blobnav", version, about)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "BLOBNAV_CONFIG")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only request the first page of each listing
    #[arg(long, global = true)]
    pub single_page: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one folder and exit
    Ls {
        /// Container URL, e.g. https://acct.blob.core.windows.net/container/path
        url: Option<String>,
        /// Folder to list instead of the URL's own path
        #[arg(long)]
        path: Option<String>,
    },
    /// Print the breadcrumb trail of a URL without fetching anything
    Trail {
        /// Container URL
        url: Option<String>,
    },
    /// Browse interactively
    Browse {
        /// Container URL
        url: Option<String>,
        /// Drop listings that complete after a newer navigation started
        #[arg(long)]
        latest_wins: bool,
    },
}
