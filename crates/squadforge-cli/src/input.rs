//! File inputs for the command line.

use std::path::Path;

use anyhow::{bail, Context};
use squadforge::{
    collect_pool, resolve_hints, BootstrapPoolSource, Item, PayloadHintSource, PoolSource,
    Squad, SquadConfig, StaticHintSource,
};

/// Reads a pool from either a bootstrap document or a JSON array of items.
pub fn load_pool(path: &Path) -> anyhow::Result<Vec<Item>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(&contents)
            .with_context(|| format!("parse item list {}", path.display()));
    }

    let source = BootstrapPoolSource::from_json_str(&contents)
        .with_context(|| format!("parse bootstrap document {}", path.display()))?;
    let pool = collect_pool(source.fetch()?);
    if pool.items.is_empty() && !pool.rejected.is_empty() {
        bail!(
            "{}: none of {} records could be read",
            path.display(),
            pool.rejected.len()
        );
    }
    Ok(pool.items)
}

/// Reads a squad as a JSON array of items.
pub fn load_squad(path: &Path) -> anyhow::Result<Squad> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse squad {}", path.display()))
}

/// Loads configuration from a file, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SquadConfig> {
    match path {
        Some(path) => SquadConfig::from_path(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(SquadConfig::default()),
    }
}

/// Collects hints from a planner reply file and from the command line.
///
/// An unreadable planner reply yields no hints from that file; hints given
/// on the command line are appended after it.
pub fn load_hints(path: Option<&Path>, inline: &[String]) -> anyhow::Result<Vec<String>> {
    let mut hints = match path {
        Some(path) => {
            let payload = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            resolve_hints(&PayloadHintSource::new(payload))
        }
        None => Vec::new(),
    };
    hints.extend(resolve_hints(&StaticHintSource::new(inline.iter().cloned())));
    Ok(hints)
}
