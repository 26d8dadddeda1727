//! CLI layer: clap argument parsing, store wiring, dispatch to the
//! `forkfulapp` library, and terminal rendering. Holds no state of its
//! own beyond the parsed arguments.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use forkfulapp::backup;
use forkfulapp::config::ForkfulConfig;
use forkfulapp::images::fs::FsImageStore;
use forkfulapp::repository::{RecipeDraft, RecipePatch, RecipeRepository};
use forkfulapp::store::fs::FsDocumentStore;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

mod render;

#[derive(Parser)]
#[command(name = "forkful", version, about = "A local-first recipe catalog")]
struct Cli {
    /// Override the data directory (defaults to the OS data dir)
    #[arg(long, global = true, env = "FORKFUL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all recipes
    List,
    /// Add a recipe
    Add {
        /// Recipe name (max 30 characters)
        name: String,
        /// Free-text notes (max 500 characters)
        #[arg(long)]
        notes: Option<String>,
        /// Path to a photo to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit fields of an existing recipe
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Path to a replacement photo
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a recipe and its photo
    Delete { id: Uuid },
    /// Remove every recipe (photos stay on disk until `gc`)
    Clear {
        /// Confirm: this cannot be undone
        #[arg(long)]
        yes: bool,
    },
    /// Export the catalog to a portable JSON backup
    Export {
        /// Output file (defaults to RecipeBackup_<timestamp>.json)
        output: Option<PathBuf>,
    },
    /// Import a backup, replacing the current catalog
    Import {
        input: PathBuf,
        /// Confirm: the current catalog is overwritten
        #[arg(long)]
        yes: bool,
    },
    /// Delete photo files no recipe references
    Gc,
}

pub fn run() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let config = ForkfulConfig::load(&data_dir.join("forkful.toml"))?;

    let repo = RecipeRepository::new(
        FsDocumentStore::new(data_dir.clone()),
        FsImageStore::new(data_dir.join(&config.image_dir))
            .with_limits(config.max_image_dimension, config.jpeg_quality),
    );
    repo.init().context("failed to initialize the catalog")?;

    match cli.command {
        Command::List => {
            render::recipe_list(&repo.list()?);
        }
        Command::Add { name, notes, image } => {
            let mut draft = RecipeDraft::new(name);
            draft.notes = notes;
            draft.image = image;
            let record = repo
                .create(draft)?
                .record
                .context("create returned no record")?;
            println!("Created {}: {}", record.id, record.name);
        }
        Command::Edit {
            id,
            name,
            notes,
            image,
        } => {
            if name.is_none() && notes.is_none() && image.is_none() {
                bail!("nothing to change: pass --name, --notes, or --image");
            }
            let patch = RecipePatch { name, notes, image };
            let record = repo
                .update(id, patch)?
                .record
                .context("update returned no record")?;
            println!("Updated {}: {}", record.id, record.name);
        }
        Command::Delete { id } => {
            repo.delete(id)?;
            println!("Deleted {}", id);
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("this removes every recipe; re-run with --yes to confirm");
            }
            repo.clear_all()?;
            println!("Catalog cleared. Run `forkful gc` to reclaim photo files.");
        }
        Command::Export { output } => {
            let payload = backup::export_document(repo.documents(), repo.images())?;
            let path =
                output.unwrap_or_else(|| PathBuf::from(backup::backup_filename(chrono::Utc::now())));
            fs::write(&path, payload)
                .with_context(|| format!("failed to write {}", path.display()))?;
            backup::mark_backed_up(repo.documents())?;
            println!("Exported to {}", path.display());
        }
        Command::Import { input, yes } => {
            if !yes {
                bail!("import replaces the current catalog; re-run with --yes to confirm");
            }
            let payload = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let doc = backup::import_document(repo.documents(), repo.images(), &payload)?;
            println!("Imported {} recipes from {}", doc.recipes.len(), input.display());
        }
        Command::Gc => {
            let reclaimed = repo.cleanup_images()?;
            println!("Reclaimed {} orphan photo(s)", reclaimed.len());
        }
    }

    Ok(())
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    let dirs = ProjectDirs::from("", "", "forkful")
        .context("could not determine a data directory for this platform")?;
    Ok(dirs.data_dir().to_path_buf())
}
