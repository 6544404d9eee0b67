//! Export command handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use postboard_core::{Config, Store};

use crate::output::Output;

/// Write the board and its statistics as pretty JSON to a file or stdout
pub fn run(config: &Config, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = Store::open(config);
    let snapshot = store.export_snapshot().context("Failed to export board")?;
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize export")?;

    match path {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write export to {:?}", path))?;
            output.success(&format!(
                "Exported {} post(s) to {}",
                snapshot.statistics.total_posts,
                path.display()
            ));
        }
        None => println!("{}", json),
    }

    Ok(())
}
