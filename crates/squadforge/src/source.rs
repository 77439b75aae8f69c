//! Pool sources.
//!
//! A [`PoolSource`] yields one outcome per record so that a caller can tell
//! a record that could not be read from one that was never there.
//!
//! # Example
//!
//! ```
//! use squadforge::source::{collect_pool, BootstrapPoolSource, PoolSource};
//!
//! let source = BootstrapPoolSource::from_json_str(r#"{
//!     "teams": [{"id": 1, "name": "Arsenal"}],
//!     "elements": [
//!         {"id": 7, "first_name": "Bukayo", "second_name": "Saka",
//!          "element_type": 3, "team": 1, "now_cost": 101, "total_points": 180},
//!         {"id": 8, "first_name": "Ghost", "second_name": "Player",
//!          "element_type": 9, "team": 1, "now_cost": 40, "total_points": 0}
//!     ]
//! }"#).unwrap();
//!
//! let pool = collect_pool(source.fetch().unwrap());
//! assert_eq!(pool.items.len(), 1);
//! assert_eq!(pool.items[0].name, "Bukayo Saka");
//! assert_eq!(pool.rejected.len(), 1);
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use squadforge_core::{Category, Item};
use tracing::{info, warn};

use crate::error::{RecordError, SourceError};

/// Outcome of reading one pool record.
pub type RecordOutcome = Result<Item, RecordError>;

/// Supplies candidate items.
pub trait PoolSource {
    /// Reads every record.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] only when the document as a whole cannot be
    /// read; individual bad records are reported inside the vector.
    fn fetch(&self) -> Result<Vec<RecordOutcome>, SourceError>;
}

/// An in-memory pool.
#[derive(Debug, Clone, Default)]
pub struct StaticPoolSource {
    items: Vec<Item>,
}

impl StaticPoolSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl PoolSource for StaticPoolSource {
    fn fetch(&self) -> Result<Vec<RecordOutcome>, SourceError> {
        Ok(self.items.iter().cloned().map(Ok).collect())
    }
}

/// A fantasy-football "bootstrap-static" document.
///
/// `element_type` 1 to 4 maps to GK, DEF, MID and FWD; `now_cost` is in
/// tenths; the item name is `"first_name second_name"`. Negative point
/// totals are clamped to zero.
#[derive(Debug, Clone)]
pub struct BootstrapPoolSource {
    teams: HashMap<i64, String>,
    elements: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct BootstrapDocument {
    #[serde(default)]
    teams: Vec<Team>,
    elements: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Team {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Element {
    id: Option<u32>,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    second_name: String,
    element_type: Option<i64>,
    team: Option<i64>,
    #[serde(default)]
    now_cost: i64,
    #[serde(default)]
    total_points: i64,
}

impl BootstrapPoolSource {
    /// Parses a document from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SourceError> {
        let document: BootstrapDocument = serde_json::from_str(s)?;
        let elements = document
            .elements
            .ok_or_else(|| SourceError::Malformed("missing `elements` array".to_string()))?;
        Ok(Self {
            teams: document
                .teams
                .into_iter()
                .map(|team| (team.id, team.name))
                .collect(),
            elements,
        })
    }

    /// Reads a document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Returns the number of raw records in the document.
    pub fn record_count(&self) -> usize {
        self.elements.len()
    }

    fn parse_record(&self, index: usize, value: &Value) -> RecordOutcome {
        let element = Element::deserialize(value).map_err(|e| RecordError::Malformed {
            index,
            message: e.to_string(),
        })?;
        let id = element.id.ok_or(RecordError::MissingField {
            index,
            field: "id",
        })?;
        let element_type = element.element_type.ok_or(RecordError::MissingField {
            index,
            field: "element_type",
        })?;
        let team = element.team.ok_or(RecordError::MissingField {
            index,
            field: "team",
        })?;

        let category = category_of(element_type)
            .ok_or(RecordError::UnknownElementType { id, element_type })?;
        let group = self
            .teams
            .get(&team)
            .ok_or(RecordError::UnknownTeam { id, team })?;
        let name = format!(
            "{} {}",
            element.first_name.trim(),
            element.second_name.trim()
        )
        .trim()
        .to_string();
        let score = u32::try_from(element.total_points.max(0)).unwrap_or(u32::MAX);

        Item::new(
            id,
            name,
            category,
            group.as_str(),
            Decimal::new(element.now_cost, 1),
            score,
        )
        .map_err(|source| RecordError::Invalid { id, source })
    }
}

impl PoolSource for BootstrapPoolSource {
    fn fetch(&self) -> Result<Vec<RecordOutcome>, SourceError> {
        Ok(self
            .elements
            .iter()
            .enumerate()
            .map(|(index, value)| self.parse_record(index, value))
            .collect())
    }
}

fn category_of(element_type: i64) -> Option<Category> {
    match element_type {
        1 => Some(Category::Goalkeeper),
        2 => Some(Category::Defender),
        3 => Some(Category::Midfielder),
        4 => Some(Category::Forward),
        _ => None,
    }
}

/// A pool split into usable items and rejected records.
#[derive(Debug, Default)]
pub struct CollectedPool {
    pub items: Vec<Item>,
    pub rejected: Vec<RecordError>,
}

/// Splits record outcomes, logging every rejected record.
pub fn collect_pool(outcomes: Vec<RecordOutcome>) -> CollectedPool {
    let mut pool = CollectedPool::default();
    for outcome in outcomes {
        match outcome {
            Ok(item) => pool.items.push(item),
            Err(error) => {
                warn!(event = "record_rejected", error = %error);
                pool.rejected.push(error);
            }
        }
    }
    info!(
        event = "pool_loaded",
        items = pool.items.len(),
        rejected = pool.rejected.len(),
    );
    pool
}
