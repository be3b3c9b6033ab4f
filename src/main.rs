mod app;
mod cli;
mod infra;
mod llms;
mod state;
mod ui;

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use dm_base::shared::store_dir;
use dm_mod_menu::{ClickOutcome, MenuRegistrar, TmuxRegistry};
use dm_mod_selection::{HostEnv, SystemHost, Tab, TabHost, TabKind};

use app::{App, headless};
use app::flow::{Config, DemystifyFlow};
use cli::{Cli, Command};
use llms::OpenAiClient;
use state::persistence::ConfigStore;

fn main() -> io::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let store = store_dir();
    infra::logging::init(&store)?;
    tracing::debug!(store = %store.display(), "starting");

    if let Some(Command::InstallMenu { key, print }) = &cli.cmd {
        return install_menu(key, *print);
    }

    let mut host = SystemHost::new(HostEnv::from_process());
    if cli.stdin {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        host = host.with_stdin(text);
    }

    let tab = match &cli.cmd {
        Some(Command::MenuClick { item_id }) => {
            match menu_click_tab(&MenuRegistrar::new(), item_id, &host, host.tab_for(TabKind::Tmux)) {
                Some(tab) => Some(tab),
                None => return Ok(ExitCode::SUCCESS),
            }
        }
        _ => cli.requested_kind().map(|kind| host.tab_for(kind)),
    };

    let config_store = ConfigStore::new(&store);
    let client = OpenAiClient::from_env();
    tracing::debug!(
        endpoint = client.endpoint(),
        model = client.model(),
        config = %config_store.path().display(),
        tab = tab.as_ref().map(|t| t.kind.name()),
        "configured"
    );
    let flow = DemystifyFlow::new(Arc::new(client), Config { credential: config_store.get() });

    if cli.print {
        let mut flow = flow;
        let selection = dm_mod_selection::read(&host, tab.as_ref());
        return Ok(headless::run(&mut flow, selection, Duration::from_secs(cli.timeout_secs)).emit());
    }

    run_popup(flow, config_store, host, tab, &store)?;
    Ok(ExitCode::SUCCESS)
}

fn install_menu(key: &str, print: bool) -> io::Result<ExitCode> {
    let program = std::env::current_exe()?.to_string_lossy().into_owned();
    let mut registry = TmuxRegistry::new(key, program);
    if print {
        registry = registry.dry_run();
    }

    MenuRegistrar::new().register(&mut registry).map_err(io::Error::other)?;

    if print {
        println!("{}", registry.to_conf());
    } else {
        println!("Bound \"Demystify code\" to {} in tmux copy mode.", key);
    }
    Ok(ExitCode::SUCCESS)
}

/// Tab for a click on a menu entry, or `None` when the click should be
/// ignored: an unknown entry, or nothing selected in `tab`.
fn menu_click_tab(registrar: &MenuRegistrar, item_id: &str, host: &dyn TabHost, tab: Tab) -> Option<Tab> {
    if registrar.handle_click(item_id) == ClickOutcome::Ignored {
        tracing::warn!(item_id = %item_id, "click on unknown menu entry ignored");
        return None;
    }
    let selection = dm_mod_selection::read(host, Some(&tab));
    if !registrar.is_visible(&selection) {
        tracing::info!(kind = tab.kind.name(), "menu clicked with nothing selected");
        return None;
    }
    Some(tab)
}

fn run_popup(
    flow: DemystifyFlow,
    config_store: ConfigStore,
    host: SystemHost,
    tab: Option<Tab>,
    store: &Path,
) -> io::Result<()> {
    infra::logging::install_panic_hook(store.to_path_buf());

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(flow, config_store, Box::new(host), tab);
    app.start();
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "popup loop failed");
    }
    result
}
