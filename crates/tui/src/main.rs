mod app;
mod args;
mod renderer;

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use samwich_core::SamwichConfig;
use samwich_core::model::{Recipe, parse_recipes};
use samwich_core::nutrition::NutritionTable;
use samwich_core::store::{FileStore, InventoryStore, MacroStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use args::Args;

const DEMO_RECIPES: &str = include_str!("../assets/recipes.json");
const DEMO_NUTRITION: &str = include_str!("../assets/nutrition.json");
const DEMO_INVENTORY: &str = include_str!("../assets/inventory.json");

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = args.data_dir()?;
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    init_logging(&args.log_file()?)?;
    info!(data_dir = %data_dir.display(), "starting samwich");

    let config = match &args.config {
        Some(path) => SamwichConfig::load(path)?,
        None => SamwichConfig::default(),
    };

    let recipes: Vec<Recipe> = parse_recipes(&read_or(args.recipes.as_deref(), DEMO_RECIPES)?)
        .context("parsing recipes")?;
    let table = NutritionTable::from_json(&read_or(args.nutrition.as_deref(), DEMO_NUTRITION)?)
        .context("parsing nutrition table")?;
    let mut inventory =
        InventoryStore::from_json(&read_or(args.inventory.as_deref(), DEMO_INVENTORY)?)
            .context("parsing inventory")?;
    info!(
        recipes = recipes.len(),
        ingredients = table.len(),
        pantry = inventory.get().len(),
        "data loaded"
    );

    let store = FileStore::new(&data_dir);
    let mut macros = MacroStore::default();
    inventory.load(&store).context("loading saved pantry")?;
    macros.load(&store).context("loading saved macros")?;

    let mut app = App::new(recipes, table, inventory, macros, Box::new(store), &config);
    renderer::run_tui(&mut app)?;
    info!("bye");
    Ok(())
}

fn read_or(path: Option<&Path>, bundled: &str) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => Ok(bundled.as_bytes().to_vec()),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("samwich_core=info,samwich_tui=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
