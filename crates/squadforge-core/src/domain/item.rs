//! Candidate items and the closed category set.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, SquadForgeError};

/// Unique identity of a candidate item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId(id)
    }
}

/// Category label of an item.
///
/// The set is closed: every quota and every item refers to one of these
/// variants, so an unknown label can only appear at a parsing boundary.
///
/// # Example
///
/// ```
/// use squadforge_core::Category;
///
/// let category: Category = "mid".parse().unwrap();
/// assert_eq!(category, Category::Midfielder);
/// assert_eq!(category.label(), "MID");
/// assert!("striker".parse::<Category>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    #[cfg_attr(feature = "serde", serde(rename = "GK", alias = "gk"))]
    Goalkeeper,
    #[cfg_attr(feature = "serde", serde(rename = "DEF", alias = "def"))]
    Defender,
    #[cfg_attr(feature = "serde", serde(rename = "MID", alias = "mid"))]
    Midfielder,
    #[cfg_attr(feature = "serde", serde(rename = "FWD", alias = "fwd"))]
    Forward,
}

impl Category {
    /// Every category, in quota order.
    pub const ALL: [Category; 4] = [
        Category::Goalkeeper,
        Category::Defender,
        Category::Midfielder,
        Category::Forward,
    ];

    /// Returns the short label used in configuration and wire formats.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Goalkeeper => "GK",
            Category::Defender => "DEF",
            Category::Midfielder => "MID",
            Category::Forward => "FWD",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = SquadForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" | "GKP" | "GOALKEEPER" => Ok(Category::Goalkeeper),
            "DEF" | "DEFENDER" => Ok(Category::Defender),
            "MID" | "MIDFIELDER" => Ok(Category::Midfielder),
            "FWD" | "FORWARD" => Ok(Category::Forward),
            _ => Err(SquadForgeError::UnknownCategory(s.to_string())),
        }
    }
}

/// A candidate item in the pool.
///
/// Items are immutable once constructed and owned by the pool for the
/// duration of one allocation run.
///
/// Deserialization goes through [`Item::new`], so a negative price is
/// rejected at the wire boundary as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawItem"))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub group: String,
    pub price: Decimal,
    pub score: u32,
}

/// Unchecked wire form of [`Item`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawItem {
    id: ItemId,
    name: String,
    #[serde(alias = "position")]
    category: Category,
    #[serde(alias = "team")]
    group: String,
    price: Decimal,
    #[serde(default, alias = "points")]
    score: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawItem> for Item {
    type Error = SquadForgeError;

    fn try_from(raw: RawItem) -> Result<Self> {
        Item::new(raw.id, raw.name, raw.category, raw.group, raw.price, raw.score)
    }
}

impl Item {
    /// Creates a new item.
    ///
    /// # Errors
    ///
    /// Returns [`SquadForgeError::NegativePrice`] when `price` is below zero.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: Category,
        group: impl Into<String>,
        price: Decimal,
        score: u32,
    ) -> Result<Self> {
        let id = id.into();
        if price < Decimal::ZERO {
            return Err(SquadForgeError::NegativePrice { id: id.0, price });
        }
        Ok(Self {
            id,
            name: name.into(),
            category,
            group: group.into(),
            price,
            score,
        })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.name, self.category, self.group, self.price
        )
    }
}
