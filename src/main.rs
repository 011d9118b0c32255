// file: src/main.rs
// description: commandline admin console entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use portfolio_sync::utils::logging::{format_error, format_success, format_warning};
use portfolio_sync::{Config, NewProject, ProjectPatch, ProjectStore, Validator};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "portfolio_sync")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "CRUD facade for a Notion-backed portfolio site", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Pretty-print the JSON envelopes
    #[arg(short, long, action = ArgAction::SetTrue)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published projects in feed order
    List,

    /// Create a project record
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        slug: String,

        #[arg(long)]
        description: String,

        #[arg(long = "type", value_name = "TYPE")]
        project_type: String,

        #[arg(long)]
        title_image: String,

        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the markdown body from a file
        #[arg(long, value_name = "FILE")]
        content_file: Option<PathBuf>,

        #[arg(long)]
        ordering: Option<i64>,

        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Patch fields of an existing project
    Update {
        page_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long = "type", value_name = "TYPE")]
        project_type: Option<String>,

        #[arg(long)]
        title_image: Option<String>,

        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        #[arg(long, value_name = "FILE")]
        content_file: Option<PathBuf>,

        #[arg(long)]
        ordering: Option<i64>,

        /// Comma-separated; pass --tags with no value to clear the tag list
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        tags: Option<Vec<String>>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Archive a project (the store has no hard delete)
    Archive { page_id: String },

    /// Print a page body as markdown
    Content { page_id: String },

    /// Fetch the landing page record and its block tree
    Index,

    /// List the tag options defined on the database
    Tags,
}

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    portfolio_sync::utils::logging::init_logger(cli.color, cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let store = ProjectStore::new(&config).context("Failed to build store client")?;

    let outcome = run_command(&store, cli.command, cli.pretty).await;

    match outcome {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("{}", format_error(&err.to_string()));
            Err(err)
        }
    }
}

async fn run_command(store: &ProjectStore, command: Commands, pretty: bool) -> Result<()> {
    match command {
        Commands::List => {
            let projects = store.list().await?;
            info!("Fetched {} projects", projects.len());
            print_envelope(&serde_json::json!({ "projects": projects }), pretty)
        }
        Commands::Add {
            name,
            slug,
            description,
            project_type,
            title_image,
            content,
            content_file,
            ordering,
            tags,
        } => {
            let content = resolve_content(content, content_file)?;
            let draft = NewProject {
                name,
                slug,
                description,
                project_type,
                title_image,
                content,
                ordering,
                tags,
            };

            let receipt = store.create(&draft).await?;
            println!("{}", format_success(&receipt.message));
            print_envelope(&receipt, pretty)
        }
        Commands::Update {
            page_id,
            name,
            slug,
            description,
            project_type,
            title_image,
            content,
            content_file,
            ordering,
            tags,
            status,
        } => {
            let content = resolve_content(content, content_file)?;
            let patch = ProjectPatch {
                page_id,
                name,
                slug,
                description,
                project_type,
                title_image,
                content,
                ordering,
                tags,
                status,
            };

            let receipt = store.update(&patch).await?;
            println!("{}", format_success(&receipt.message));
            print_envelope(&receipt, pretty)
        }
        Commands::Archive { page_id } => {
            let receipt = store.archive(&page_id).await?;
            println!("{}", format_success(&receipt.message));
            print_envelope(&receipt, pretty)
        }
        Commands::Content { page_id } => {
            let content = store.page_content(&page_id).await?;
            print_envelope(&content, pretty)
        }
        Commands::Index => {
            let index = store.index_page().await?;
            print_envelope(&index, pretty)
        }
        Commands::Tags => {
            let tags = store.tag_options().await?;
            print_envelope(&tags, pretty)
        }
    }
}

fn resolve_content(
    inline: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>> {
    match (inline, file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read content file {}", path.display()))?;
            if let Err(err) = Validator::validate_content_not_empty(&content) {
                eprintln!(
                    "{}",
                    format_warning(&format!("{}: {}", path.display(), err))
                );
            }
            Ok(Some(content))
        }
        (None, None) => Ok(None),
    }
}

fn print_envelope<T: Serialize>(data: &T, pretty: bool) -> Result<()> {
    let envelope = Envelope {
        success: true,
        data,
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{}", rendered);
    Ok(())
}
