//! Plain-text rendering for the terminal.

use blobnav_browser::{FileOpener, Renderer};
use blobnav_listing::{Breadcrumb, Node, NodeKind};
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use url::Url;

const MODIFIED: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Writes folders, trails and errors to stdout; loading state to stderr when
/// stderr is a terminal.
pub struct TerminalRenderer {
    spinner: bool,
}
impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            spinner: std::io::stderr().is_terminal(),
        }
    }
}
impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn set_loading(&self, loading: bool) {
        if !self.spinner {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        // Terminal writes failing is not worth aborting a navigation over.
        let _ = match loading {
            true => write!(stderr, "loading..."),
            false => write!(stderr, "\r\x1b[K"),
        };
        let _ = stderr.flush();
    }

    fn show_error(&self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("error: {message}");
        }
    }

    fn show_folder(&self, nodes: &[Node]) {
        for node in nodes {
            println!("{}", format_node(node));
        }
    }

    fn show_empty(&self) {
        println!("(empty)");
    }

    fn show_trail(&self, trail: &[Breadcrumb]) {
        println!("{}", format_trail(trail));
    }
}

/// "Opens" a file by printing its URL, which most terminals make clickable.
pub struct PrintOpener;
impl FileOpener for PrintOpener {
    fn open(&self, url: &Url) {
        println!("{url}");
    }
}

pub fn format_trail(trail: &[Breadcrumb]) -> String {
    trail
        .iter()
        .enumerate()
        .map(|(index, crumb)| format!("[{index}] {}", crumb.label))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn format_node(node: &Node) -> String {
    match &node.kind {
        NodeKind::Folder => format!("{:>10}  {:16}  {}/", "-", "", node.name),
        NodeKind::File { size, last_modified } => {
            let modified = last_modified.and_then(|m| m.format(MODIFIED).ok()).unwrap_or_default();
            format!("{size:>10}  {modified:16}  {}", node.name)
        },
    }
}

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    List,
    Descend(String),
    Ascend,
    Jump(usize),
    Refresh,
    Open(String),
    Help,
    Quit,
    Nothing,
}
impl FromStr for Input {
    type Err = String;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };
        match (command, argument) {
            ("", _) => Ok(Self::Nothing),
            ("ls", "") => Ok(Self::List),
            ("..", "") | ("up", "") | ("cd", "..") => Ok(Self::Ascend),
            ("cd", "") => Err("usage: cd <folder>".to_string()),
            ("cd", name) => Ok(Self::Descend(name.trim_end_matches('/').to_string())),
            ("jump", index) => index.parse().map(Self::Jump).map_err(|_| "usage: jump <crumb number>".to_string()),
            ("refresh" | "r", "") => Ok(Self::Refresh),
            ("open", "") => Err("usage: open <file>".to_string()),
            ("open", name) => Ok(Self::Open(name.to_string())),
            ("help" | "?", _) => Ok(Self::Help),
            ("quit" | "q" | "exit", _) => Ok(Self::Quit),
            _ => Err(format!("unknown command: {line} (try `help`)")),
        }
    }
}

pub const HELP: &str = "\
ls              list the current folder again (no fetch)
cd <folder>     enter a folder
cd .. | up      go to the parent folder
jump <n>        go to breadcrumb number n
refresh | r     fetch the current folder again
open <file>     print a file's direct URL
quit | q        leave";
