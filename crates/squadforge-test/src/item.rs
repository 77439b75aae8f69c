//! Item fixtures.
//!
//! # Example
//!
//! ```
//! use squadforge_core::Category;
//! use squadforge_test::item::{price, ItemBuilder};
//!
//! let item = ItemBuilder::new(7)
//!     .name("Ada")
//!     .category(Category::Forward)
//!     .group("North")
//!     .price_tenths(45)
//!     .score(120)
//!     .build();
//! assert_eq!(item.price, price(45));
//! ```

use rust_decimal::Decimal;
use squadforge_core::{Category, Item};

/// Returns a price expressed in tenths, e.g. `price(45)` is 4.5.
pub fn price(tenths: i64) -> Decimal {
    Decimal::new(tenths, 1)
}

/// Creates an item with a price in tenths.
///
/// # Panics
///
/// Panics if `price_tenths` is negative.
pub fn item(
    id: u32,
    name: &str,
    category: Category,
    group: &str,
    price_tenths: i64,
    score: u32,
) -> Item {
    Item::new(id, name, category, group, price(price_tenths), score)
        .expect("fixture prices are non-negative")
}

/// Builder for items with fixture defaults.
///
/// Defaults: name `"Item {id}"`, midfielder, group `"Group {id}"`, price 5.0,
/// score 0.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    id: u32,
    name: Option<String>,
    category: Category,
    group: Option<String>,
    price: Decimal,
    score: u32,
}

impl ItemBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: None,
            category: Category::Midfielder,
            group: None,
            price: Decimal::from(5),
            score: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn price_tenths(self, tenths: i64) -> Self {
        self.price(price(tenths))
    }

    pub fn score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    /// Builds the item.
    ///
    /// # Panics
    ///
    /// Panics if the price is negative.
    pub fn build(self) -> Item {
        let id = self.id;
        Item::new(
            id,
            self.name.unwrap_or_else(|| format!("Item {id}")),
            self.category,
            self.group.unwrap_or_else(|| format!("Group {id}")),
            self.price,
            self.score,
        )
        .expect("fixture prices are non-negative")
    }
}
