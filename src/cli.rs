use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use dm_mod_menu::DEFAULT_KEY;
use dm_mod_selection::TabKind;

/// Explain the selected code in a popup
#[derive(Parser, Debug)]
#[command(version, about = "Explain the selected code in a terminal popup")]
#[command(group(ArgGroup::new("tab").args(["file", "stdin", "source"])))]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Demystify the contents of a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Demystify text piped on stdin
    #[arg(long)]
    pub stdin: bool,

    /// Read the selection from a named source: tmux, wayland or x11
    #[arg(long, value_parser = parse_source)]
    pub source: Option<TabKind>,

    /// Print the explanation to stdout instead of opening the popup
    #[arg(long)]
    pub print: bool,

    /// How long --print waits for the answer
    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bind the "Demystify code" entry into tmux copy mode
    InstallMenu {
        /// Copy-mode key that opens the popup
        #[arg(long, default_value = DEFAULT_KEY)]
        key: String,

        /// Print tmux.conf lines instead of running tmux
        #[arg(long)]
        print: bool,
    },

    /// Invoked by the copy-mode binding
    MenuClick {
        /// Id of the clicked entry
        item_id: String,
    },
}

impl Cli {
    /// The tab named on the command line, if any. Stdin is handled by the host.
    pub fn requested_kind(&self) -> Option<TabKind> {
        if let Some(path) = &self.file {
            return Some(TabKind::File(path.clone()));
        }
        if self.stdin {
            return Some(TabKind::Stdin);
        }
        self.source.clone()
    }
}

fn parse_source(name: &str) -> Result<TabKind, String> {
    match TabKind::from_source_name(name) {
        Some(TabKind::Stdin) => Err("use --stdin for piped text".to_string()),
        Some(kind) => Ok(kind),
        None => Err(format!("unknown source `{name}` (expected tmux, wayland or x11)")),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("demystify").chain(args.iter().copied()))
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_args_follow_active_tab() {
        let cli = parse(&[]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.requested_kind(), None);
        assert_eq!(cli.timeout_secs, 60);
    }

    #[test]
    fn explicit_tabs() {
        assert_eq!(parse(&["--source", "Wayland"]).unwrap().requested_kind(), Some(TabKind::Wayland));
        assert_eq!(parse(&["--stdin"]).unwrap().requested_kind(), Some(TabKind::Stdin));
        assert_eq!(
            parse(&["--file", "a.rs", "--print"]).unwrap().requested_kind(),
            Some(TabKind::File(PathBuf::from("a.rs")))
        );
    }

    #[test]
    fn bad_or_conflicting_sources_are_rejected() {
        assert!(parse(&["--source", "clipboard"]).is_err());
        assert!(parse(&["--source", "stdin"]).is_err());
        assert!(parse(&["--stdin", "--file", "a.rs"]).is_err());
    }

    #[test]
    fn subcommands() {
        match parse(&["install-menu", "--print"]).unwrap().cmd {
            Some(Command::InstallMenu { key, print }) => {
                assert_eq!(key, "D");
                assert!(print);
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse(&["menu-click", "demystify-code"]).unwrap().cmd {
            Some(Command::MenuClick { item_id }) => assert_eq!(item_id, "demystify-code"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
