use chrono::Utc;
use clap::{Parser, Subcommand};
use doclib_core::{
    DocumentLibrary, LibraryConfig, LocalDirectoryClient, RemoteDirectoryClient, SharePointClient,
    SharePointConfig, TreeOptions, DEFAULT_LIBRARY_PATH, DEFAULT_MAX_DEPTH,
};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doclib", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Site URL, e.g. https://contoso.sharepoint.com/sites/Team
    #[arg(long, env = "SHP_SITE_URL")]
    site_url: Option<String>,

    /// Library path inside the site
    #[arg(long, env = "SHP_DOC_LIBRARY", default_value = DEFAULT_LIBRARY_PATH)]
    doc_library: String,

    /// Bearer token for the site
    #[arg(long, env = "SHP_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SHP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Serve from a local directory mirror instead of the remote site.
    #[arg(long, env = "SHP_LOCAL_MIRROR")]
    local_mirror: Option<PathBuf>,

    /// Site title reported by the local mirror
    #[arg(long, default_value = "local")]
    mirror_site_title: String,
}

#[derive(Subcommand)]
enum Command {
    /// List folders below a folder, or the library root.
    Folders {
        #[arg(long)]
        parent: Option<String>,
    },
    /// List documents in a folder.
    Documents {
        #[arg(long)]
        folder: String,
    },
    /// Print the full folder tree below a folder.
    Tree {
        #[arg(long)]
        parent: Option<String>,
        /// Folders deeper than this are not expanded.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Download a document and print its normalized content.
    Content {
        #[arg(long)]
        folder: String,
        #[arg(long)]
        file: String,
    },
}

fn build_client(cli: &Cli) -> anyhow::Result<Box<dyn RemoteDirectoryClient>> {
    if let Some(mirror) = &cli.local_mirror {
        info!(mirror = %mirror.display(), "serving from local mirror");
        return Ok(Box::new(LocalDirectoryClient::new(
            mirror.clone(),
            cli.mirror_site_title.clone(),
        )));
    }

    let site_url = cli
        .site_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("SHP_SITE_URL is not set"))?;
    let access_token = cli
        .access_token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("SHP_ACCESS_TOKEN is not set"))?;

    let mut config = SharePointConfig::new(site_url, access_token)?;
    if let Some(seconds) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(seconds));
    }

    info!(site = %config.site_url, "connecting to sharepoint");
    Ok(Box::new(SharePointClient::new(&config)?))
}

fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = LibraryConfig::new(cli.doc_library.as_str())?;
    let client = build_client(&cli)?;

    info!(
        version = app_version,
        library = %config.library_path,
        started_at = %Utc::now().to_rfc3339(),
        "doclib boot"
    );

    let library = DocumentLibrary::new(client, &config);

    let output: Value = match cli.command {
        Command::Folders { parent } => serde_json::to_value(library.list_folders(parent.as_deref())?)?,
        Command::Documents { folder } => serde_json::to_value(library.list_documents(&folder)?)?,
        Command::Tree { parent, max_depth } => {
            let library = library.with_tree_options(TreeOptions { max_depth });
            let tree = library.get_folder_tree(parent.as_deref());
            info!(nodes = tree.node_count(), "tree built");
            serde_json::to_value(tree)?
        }
        Command::Content { folder, file } => {
            serde_json::to_value(library.get_document_content(&folder, &file)?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
