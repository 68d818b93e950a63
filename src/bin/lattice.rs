//! Lattice CLI: inspect and lay out an article collection snapshot.
//!
//! Usage:
//!   lattice resolve [--data path]
//!   lattice layout [--data path] [--ticks n] [--width w] [--height h]
//!   lattice sweep [--data path]

use clap::{Parser, Subcommand};
use lattice::article::{self, ArticleId};
use lattice::store::{ArticleStore, MemoryStore};
use lattice::view::GraphController;
use lattice::workspace::Workspace;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "lattice",
    version,
    about = "Personal knowledge graph with a force-directed visualization core"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve relationships and print the hierarchy overview
    Resolve {
        /// Path to the article snapshot file
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Run the force layout and emit the scene as JSON
    Layout {
        /// Path to the article snapshot file
        #[arg(long)]
        data: Option<PathBuf>,
        /// Maximum number of simulation ticks
        #[arg(long, default_value_t = 300)]
        ticks: usize,
        /// Viewport width
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        /// Viewport height
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Article id to render as selected
        #[arg(long)]
        select: Option<String>,
    },
    /// Assign orphans to the #unassigned bucket and write the snapshot back
    Sweep {
        /// Path to the article snapshot file
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Default snapshot path (~/.local/share/lattice/articles.json)
fn default_data_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    let lattice_dir = data_dir.join("lattice");
    std::fs::create_dir_all(&lattice_dir).ok();
    lattice_dir.join("articles.json")
}

fn open_store(data: Option<PathBuf>) -> Result<(MemoryStore, PathBuf), String> {
    let path = data.unwrap_or_else(default_data_path);
    let store = MemoryStore::from_snapshot_file(&path)
        .map_err(|e| format!("failed to load '{}': {}", path.display(), e))?;
    Ok((store, path))
}

fn cmd_resolve(store: &MemoryStore) -> i32 {
    let mut articles = store.snapshot().articles;
    article::normalize_collection(&mut articles);
    let resolved = article::resolve(&mut articles);

    let title = |id: &ArticleId| {
        articles
            .iter()
            .find(|a| &a.id == id)
            .map(|a| a.title.clone())
            .unwrap_or_else(|| "?".to_string())
    };

    println!("{} articles", articles.len());
    match &resolved.main {
        Some(id) => println!("main:       {} ({})", title(id), id),
        None => println!("main:       (none)"),
    }
    match &resolved.unassigned {
        Some(id) => println!("unassigned: {} ({})", title(id), id),
        None => println!("unassigned: (none)"),
    }
    println!();
    println!("{:<28}  {:>5}  {:>5}  PARENTS", "TITLE", "TAGS", "PARTS");
    println!("{}", "-".repeat(72));
    for a in &articles {
        let parents: Vec<String> = article::parents_of(a, &articles)
            .iter()
            .map(|p| p.title.clone())
            .collect();
        println!(
            "{:<28}  {:>5}  {:>5}  {}",
            a.title,
            a.tags.len(),
            a.parts.len(),
            parents.join(", ")
        );
    }
    if !resolved.orphans.is_empty() {
        println!();
        println!("orphans:");
        for id in &resolved.orphans {
            println!("  {} ({})", title(id), id);
        }
    }
    0
}

fn cmd_layout(
    store: &MemoryStore,
    ticks: usize,
    width: f64,
    height: f64,
    select: Option<String>,
) -> i32 {
    let mut articles = store.snapshot().articles;
    article::normalize_collection(&mut articles);
    article::resolve(&mut articles);

    let mut view = GraphController::new(&articles, width, height);
    if let Some(id) = select {
        view.on_node_click(&ArticleId::new(id));
    }
    let mut remaining = ticks;
    while remaining > 0 && view.tick() {
        remaining -= 1;
    }

    let scene = view.scene();
    match serde_json::to_string_pretty(&scene) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_sweep(store: Arc<MemoryStore>, path: &PathBuf) -> i32 {
    let mut workspace = Workspace::new(store.clone() as Arc<dyn ArticleStore>);
    if let Err(e) = workspace.fetch_articles().await {
        eprintln!("Error: {}", e);
        return 1;
    }
    let Some(bucket) = workspace.state().unassigned.clone() else {
        eprintln!("No #unassigned bucket in the collection; nothing to do.");
        return 1;
    };
    workspace.assign_orphans().await;
    if let Some(error) = &workspace.state().error {
        eprintln!("Error: {}", error);
        return 1;
    }
    if let Err(e) = store.save_snapshot_file(path) {
        eprintln!("Error: failed to write '{}': {}", path.display(), e);
        return 1;
    }
    let bucketed = workspace
        .state()
        .articles
        .iter()
        .filter(|a| a.tags.contains(&bucket))
        .count();
    println!("Swept orphans into the bucket ({} articles tagged).", bucketed);
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Resolve { data } => match open_store(data) {
            Ok((store, _)) => cmd_resolve(&store),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Layout {
            data,
            ticks,
            width,
            height,
            select,
        } => match open_store(data) {
            Ok((store, _)) => cmd_layout(&store, ticks, width, height, select),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Sweep { data } => match open_store(data) {
            Ok((store, path)) => {
                let runtime = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                };
                runtime.block_on(cmd_sweep(Arc::new(store), &path))
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
