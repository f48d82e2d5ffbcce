use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use std::{collections::HashMap, fmt::Display};

/// Defines the JSON format for one product in the catalogue.
///
/// Only `title` and `price` are used for pricing. Both may be missing or
/// `null` in the input, in which case the entry is rejected when building a
/// [`PriceIndex`]. The whole object is kept as given, so that a rejected
/// entry can be reported exactly as it appeared in the catalogue.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CatalogueEntry(Map<String, Value>);

impl CatalogueEntry {
    /// Creates an entry for the product `title` at unit price `price`.
    #[must_use]
    pub fn new(title: &str, price: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("title".into(), title.into());
        fields.insert("price".into(), price.into());
        Self(fields)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }

    /// Returns the title and unit price of this entry, or `None` if either
    /// is missing or has the wrong type.
    #[must_use]
    pub fn priced(&self) -> Option<(&str, f64)> {
        Some((self.title()?, self.price()?))
    }
}

impl Display for CatalogueEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// The result of looking up a product in a [`PriceIndex`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup {
    Found(f64),
    Missing,
}

/// Maps product titles to unit prices.
///
/// To build an index from catalogue data, use [`PriceIndex::build`]. Once
/// built, the index is read-only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceIndex(HashMap<String, f64>);

impl PriceIndex {
    /// Builds a price index from catalogue `entries`.
    ///
    /// Entries without a string `title` or a numeric `price` are skipped, with
    /// a warning naming the whole entry. If the same title appears more than
    /// once, the last price wins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compute_sales::{CatalogueEntry, Lookup, PriceIndex};
    /// let index = PriceIndex::build(&[
    ///     CatalogueEntry::new("Pen", 2.5),
    ///     CatalogueEntry::new("Pen", 3.0),
    /// ]);
    /// assert_eq!(index.lookup("Pen"), Lookup::Found(3.0));
    /// assert_eq!(index.lookup("Book"), Lookup::Missing);
    /// ```
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a CatalogueEntry>) -> Self {
        let mut prices = HashMap::new();
        for entry in entries {
            let Some((title, price)) = entry.priced() else {
                warn!("Invalid product entry: {entry}");
                continue;
            };
            prices.insert(title.to_string(), price);
        }
        debug!(products = prices.len(), "built price index");
        Self(prices)
    }

    /// Returns the unit price of `product`, if it is in the index.
    #[must_use]
    pub fn lookup(&self, product: &str) -> Lookup {
        self.0
            .get(product)
            .copied()
            .map_or(Lookup::Missing, Lookup::Found)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
