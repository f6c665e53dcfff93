use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Swipe through recipes, tweak them to what is in the pantry, and keep a
/// running tally of the day's macros.
#[derive(Parser, Debug)]
#[command(name = "samwich", version)]
pub struct Args {
    /// JSON settings file (swipe policy, deck window, springs, goals)
    #[arg(long, env = "SAMWICH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Recipe list (`{"recipeData": [...]}`); bundled demo recipes if omitted
    #[arg(long, env = "SAMWICH_RECIPES")]
    pub recipes: Option<PathBuf>,

    /// Nutrition table keyed by ingredient name
    #[arg(long, env = "SAMWICH_NUTRITION")]
    pub nutrition: Option<PathBuf>,

    /// Seed pantry (`{"foodItemsData": [...]}`)
    #[arg(long, env = "SAMWICH_INVENTORY")]
    pub inventory: Option<PathBuf>,

    /// Where the pantry and macro totals are persisted
    #[arg(long, env = "SAMWICH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log file; the terminal itself is owned by the UI
    #[arg(long, env = "SAMWICH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// `--data-dir`, else `samwich` under the platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("samwich"))
                .context("no platform data directory; pass --data-dir"),
        }
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(self.data_dir()?.join("samwich.log")),
        }
    }
}
