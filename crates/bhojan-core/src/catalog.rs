//! # Menu Catalog
//!
//! The read-only item catalog the bill calculator prices orders against.
//!
//! ## Construction-Time Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu source rows ──► MenuCatalog::from_rows ──► MenuCatalog            │
//! │                           │                                             │
//! │                           ├── blank name?        → Required             │
//! │                           ├── blank category?    → Required             │
//! │                           ├── negative price?    → OutOfRange           │
//! │                           ├── tax rate > 100%?   → OutOfRange           │
//! │                           └── duplicate name?    → Duplicate            │
//! │                                                                         │
//! │  Nothing downstream substitutes defaults: once a catalog exists every  │
//! │  entry has a price, a category and a tax rate.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{validate_item_name, validate_price, validate_tax_rate_bps};

/// A raw row from a menu source, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRow {
    pub name: String,
    pub price: Money,
    pub category: String,
    pub tax_rate: TaxRate,
}

impl MenuRow {
    /// Convenience constructor from minor units and basis points.
    pub fn new(
        name: impl Into<String>,
        price_cents: i64,
        category: impl Into<String>,
        tax_rate_bps: u32,
    ) -> Self {
        MenuRow {
            name: name.into(),
            price: Money::from_cents(price_cents),
            category: category.into(),
            tax_rate: TaxRate::from_bps(tax_rate_bps),
        }
    }
}

/// A validated menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuEntry {
    pub name: String,
    pub price: Money,
    pub category: String,
    pub tax_rate: TaxRate,
}

impl MenuEntry {
    /// Validates and normalises a single row (names and categories are trimmed).
    pub fn try_from_row(row: MenuRow) -> CoreResult<Self> {
        validate_item_name(&row.name)?;
        validate_price(row.price)?;
        validate_tax_rate_bps(row.tax_rate.bps())?;

        let category = row.category.trim();
        if category.is_empty() {
            return Err(ValidationError::Required {
                field: format!("category of '{}'", row.name.trim()),
            }
            .into());
        }

        Ok(MenuEntry {
            name: row.name.trim().to_string(),
            price: row.price,
            category: category.to_string(),
            tax_rate: row.tax_rate,
        })
    }
}

/// Item name → entry, immutable for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCatalog {
    entries: BTreeMap<String, MenuEntry>,
}

impl MenuCatalog {
    /// Builds a catalog, rejecting the first malformed or duplicate row.
    ///
    /// ## Example
    /// ```rust
    /// use bhojan_core::catalog::{MenuCatalog, MenuRow};
    ///
    /// let catalog = MenuCatalog::from_rows(vec![
    ///     MenuRow::new("Tea", 1000, "Drinks", 500),
    ///     MenuRow::new("Idli", 4000, "Breakfast", 500),
    /// ]).unwrap();
    /// assert_eq!(catalog.len(), 2);
    ///
    /// let dup = MenuCatalog::from_rows(vec![
    ///     MenuRow::new("Tea", 1000, "Drinks", 500),
    ///     MenuRow::new(" Tea ", 1200, "Drinks", 500),
    /// ]);
    /// assert!(dup.is_err());
    /// ```
    pub fn from_rows<I>(rows: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = MenuRow>,
    {
        let mut entries = BTreeMap::new();

        for row in rows {
            let entry = MenuEntry::try_from_row(row)?;
            if entries.contains_key(&entry.name) {
                return Err(CoreError::Validation(ValidationError::Duplicate {
                    field: "itemname".to_string(),
                    value: entry.name,
                }));
            }
            entries.insert(entry.name.clone(), entry);
        }

        Ok(MenuCatalog { entries })
    }

    /// Looks up an item by exact name.
    pub fn get(&self, name: &str) -> Option<&MenuEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.values()
    }

    /// Groups entries by category; categories and items both sorted by name.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&MenuEntry>> {
        let mut groups: BTreeMap<&str, Vec<&MenuEntry>> = BTreeMap::new();
        for entry in self.entries.values() {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        groups
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_trims_and_indexes() {
        let catalog = MenuCatalog::from_rows(vec![MenuRow::new(" Tea ", 1000, " Drinks", 500)])
            .unwrap();

        let tea = catalog.get("Tea").unwrap();
        assert_eq!(tea.price.cents(), 1000);
        assert_eq!(tea.category, "Drinks");
        assert_eq!(tea.tax_rate.bps(), 500);
        assert!(catalog.get(" Tea ").is_none());
    }

    #[test]
    fn test_empty_source_is_empty_catalog() {
        let catalog = MenuCatalog::from_rows(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog, MenuCatalog::default());
    }

    #[test]
    fn test_malformed_rows_rejected() {
        let cases = vec![
            MenuRow::new("", 1000, "Drinks", 500),
            MenuRow::new("Tea", -1, "Drinks", 500),
            MenuRow::new("Tea", 1000, "   ", 500),
            MenuRow::new("Tea", 1000, "Drinks", 10_001),
        ];

        for row in cases {
            let result = MenuCatalog::from_rows(vec![row.clone()]);
            assert!(
                matches!(result, Err(CoreError::Validation(_))),
                "row should be rejected: {:?}",
                row
            );
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = MenuCatalog::from_rows(vec![
            MenuRow::new("Tea", 1000, "Drinks", 500),
            MenuRow::new("Tea", 1500, "Drinks", 500),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            CoreError::Validation(ValidationError::Duplicate {
                field: "itemname".to_string(),
                value: "Tea".to_string(),
            })
        );
    }

    #[test]
    fn test_by_category_sorted() {
        let catalog = MenuCatalog::from_rows(vec![
            MenuRow::new("Vada", 3000, "Breakfast", 500),
            MenuRow::new("Tea", 1000, "Drinks", 500),
            MenuRow::new("Idli", 4000, "Breakfast", 500),
        ])
        .unwrap();

        let groups = catalog.by_category();
        let categories: Vec<_> = groups.keys().copied().collect();
        assert_eq!(categories, vec!["Breakfast", "Drinks"]);

        let breakfast: Vec<_> = groups["Breakfast"].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(breakfast, vec!["Idli", "Vada"]);
    }
}
