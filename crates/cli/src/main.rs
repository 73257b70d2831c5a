use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navtree_engine::{
    ControllerOptions, ListValue, NavigationController, NavigationSink, find_menu_node, find_menu_path, navigate_to_locator,
    visible_rows,
};
use navtree_types::{RawObject, WidgetConfig};
use navtree_util::{JsonFileStore, MenuStateStore, default_config_path, load_widget_config_from};
use tracing::{Subscriber, debug, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

mod render;

#[derive(Debug, Parser)]
#[command(name = "navtree", version, about = "Inspect and drive a menu navigation tree")]
struct Cli {
    /// JSON file holding the raw menu objects.
    #[arg(long, global = true)]
    menus: Option<PathBuf>,
    /// JSON file holding the raw resource objects.
    #[arg(long, global = true)]
    resources: Option<PathBuf>,
    /// Storage file for persisted expansion and selection. Defaults to
    /// `NAVTREE_STORAGE_PATH`, then the user config directory.
    #[arg(long, global = true)]
    storage: Option<PathBuf>,
    /// Widget configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print the navigation state as JSON instead of sidebar rows.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sidebar as it would be drawn.
    Show,
    /// Flip the expansion flag of one menu.
    Toggle { menu_id: String },
    ExpandAll,
    CollapseAll,
    /// Mark a menu active and dispatch its page.
    Click { menu_id: String },
    /// Print the root-to-node path of a menu.
    Path { menu_id: String },
    /// Forget persisted expansion and selection.
    Reset,
}

/// Prints the navigation the host would perform.
struct StdoutSink;

impl NavigationSink for StdoutSink {
    fn open_url(&mut self, url: &str) {
        println!("navigate: url {url}");
    }

    fn open_page(&mut self, page: &str) {
        println!("navigate: page {page}");
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path, std::io::stderr)?;
    init_tracing(config.debug_mode);
    debug!(config = %config_path.display(), "Loaded widget config");

    let store = open_store(cli.storage.clone());
    let command = cli.command.take().unwrap_or(Command::Show);
    if let Command::Reset = command {
        store.clear_expanded_menu_ids();
        store.clear_active_menu_id();
        println!("Cleared persisted navigation state");
        return Ok(());
    }

    let mut controller = NavigationController::new(store, ControllerOptions::from(&config));
    let menus = cli.menus.as_deref().context("--menus is required")?;
    let menus = read_objects(menus)?;
    let resources = match cli.resources.as_deref() {
        Some(path) => read_objects(path)?,
        None => Vec::new(),
    };
    controller.on_data_source(&ListValue::Available(menus), &ListValue::Available(resources));

    match &command {
        Command::Show | Command::Reset => {}
        Command::Toggle { menu_id } => controller.on_toggle_expand(menu_id),
        Command::ExpandAll => controller.on_expand_all(),
        Command::CollapseAll => controller.on_collapse_all(),
        Command::Click { menu_id } => {
            let event = controller
                .click_event(menu_id)
                .with_context(|| format!("menu '{menu_id}' is not in the tree"))?;
            controller.on_menu_click(menu_id);
            if navigate_to_locator(&mut StdoutSink, event.page_url.as_deref()).is_none() {
                println!("navigate: menu '{}' has no page", event.menu_name);
            }
        }
        Command::Path { menu_id } => {
            let tree = controller.menu_tree();
            let path = find_menu_path(tree, menu_id).with_context(|| format!("menu '{menu_id}' is not in the tree"))?;
            let names: Vec<&str> = path
                .iter()
                .filter_map(|id| find_menu_node(tree, id))
                .map(|node| node.record.display_name())
                .collect();
            println!("{}", names.join(" > "));
            return Ok(());
        }
    }

    print_state(&controller, &config, cli.json)
}

fn build_subscriber<W>(debug_mode: bool, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let default_level = if debug_mode { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).finish()
}

fn init_tracing(debug_mode: bool) {
    let _ = tracing::subscriber::set_global_default(build_subscriber(debug_mode, std::io::stderr));
}

/// Loads the widget config under a default-level subscriber, since the config
/// itself decides the level of the global one.
fn load_config<W>(path: &Path, writer: W) -> Result<WidgetConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing::subscriber::with_default(build_subscriber(false, writer), || load_widget_config_from(path))
        .with_context(|| format!("failed to load config from {}", path.display()))
}

/// Opens the file-backed store. A store that cannot be opened degrades to a
/// detached one, which reads as empty and drops writes.
fn open_store(path: Option<PathBuf>) -> MenuStateStore {
    match JsonFileStore::new(path) {
        Ok(backend) => {
            debug!(path = %backend.path().display(), "Opened navigation storage");
            MenuStateStore::new(Arc::new(backend))
        }
        Err(error) => {
            warn!(error = %error, "Failed to open navigation storage; state will not persist");
            MenuStateStore::detached()
        }
    }
}

fn read_objects(path: &Path) -> Result<Vec<RawObject>> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_state(controller: &NavigationController, config: &WidgetConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(controller.state())?);
        return Ok(());
    }
    let rows = visible_rows(controller.menu_tree(), controller.active_menu_id(), config.max_depth);
    let home_marker = if controller.active_menu_id().is_none() { "*" } else { " " };
    println!("{home_marker} ⌂ {}", config.home_label);
    if rows.is_empty() {
        println!("(no menus)");
    } else {
        println!("{}", render::format_rows(&rows, config.show_depth_indicator));
    }
    Ok(())
}
