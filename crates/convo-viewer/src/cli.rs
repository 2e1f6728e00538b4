use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{ChainsView, TreeView, Viewer};
use crate::config::ViewerConfig;
use crate::console::run_console;
use crate::fetch::ApiClient;
use crate::logging;
use crate::once::run_once;

#[derive(Debug, Parser)]
#[command(
    name = "convo-viewer",
    about = "Browse conversation chains and conversation trees in the terminal",
    version
)]
pub struct Cli {
    /// Config file. Defaults to <config_dir>/convo-viewer/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fetch once, print to stdout and exit.
    #[arg(long, global = true)]
    pub once: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Page through precomputed conversation chains.
    Chains(ChainsArgs),

    /// Explore a conversation tree built from a flat node list.
    Tree(TreeArgs),
}

#[derive(Debug, Args)]
pub struct ChainsArgs {
    /// Chains endpoint, overriding `chains.url`.
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Node list endpoint, overriding `tree.url`.
    #[arg(long)]
    pub url: Option<String>,

    /// Root node id, overriding `tree.root_id`.
    #[arg(long)]
    pub root: Option<String>,
}

impl Cli {
    /// Build the selected viewer from config plus command-line overrides.
    pub fn viewer(&self, config: &ViewerConfig) -> Viewer {
        match &self.command {
            Commands::Chains(args) => {
                let url = args.url.clone().unwrap_or_else(|| config.chains.url.clone());
                Viewer::Chains(ChainsView::new(url))
            }
            Commands::Tree(args) => {
                let url = args.url.clone().unwrap_or_else(|| config.tree.url.clone());
                let root = args.root.clone().unwrap_or_else(|| config.tree.root_id.clone());
                Viewer::Tree(TreeView::new(
                    url,
                    root,
                    config.layout.clone(),
                    config.canvas.zoom,
                    config.canvas.pan_step,
                ))
            }
        }
    }
}

pub async fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let config = ViewerConfig::load(cli.config.as_deref())?;
    logging::init(&config.log, !cli.once)?;

    let viewer = cli.viewer(&config);
    let client = ApiClient::new(&config.fetch)?;
    tracing::info!(url = viewer.target().url(), once = cli.once, "Starting viewer");

    if cli.once {
        let stdout = std::io::stdout();
        run_once(viewer, &client, &mut stdout.lock()).await
    } else {
        run_console(viewer, client).await
    }
}
