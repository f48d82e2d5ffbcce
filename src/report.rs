use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use std::fmt::Display;

use crate::{
    catalogue::{Lookup, PriceIndex},
    usd::Usd,
};

/// Defines the JSON format for sale records.
///
/// All three fields may be missing or of any JSON type; [`reconcile`] decides
/// what to do with each record. Other fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SaleRecord {
    #[serde(rename = "SALE_ID", default)]
    pub sale_id: Value,
    #[serde(rename = "Product", default)]
    pub product: Value,
    #[serde(rename = "Quantity", default)]
    pub quantity: Value,
}

/// The outcome of pricing one sale record.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    /// The product is not in the price index.
    NotFound { sale_id: Value, product: Value },
    /// The product is known, but the quantity is not a number.
    InvalidQuantity {
        sale_id: Value,
        product: Value,
        quantity: Value,
    },
    /// The sale was priced successfully.
    Sale {
        sale_id: Value,
        product: String,
        quantity: Number,
        cost: Usd,
    },
}

impl Line {
    /// Prices `sale` against `prices`.
    #[must_use]
    pub fn price(sale: &SaleRecord, prices: &PriceIndex) -> Self {
        let sale_id = sale.sale_id.clone();
        let found = sale
            .product
            .as_str()
            .map(|product| (product, prices.lookup(product)));
        let Some((product, Lookup::Found(price))) = found else {
            return Line::NotFound {
                sale_id,
                product: sale.product.clone(),
            };
        };
        let Some((quantity, qty)) = numeric(&sale.quantity) else {
            return Line::InvalidQuantity {
                sale_id,
                product: sale.product.clone(),
                quantity: sale.quantity.clone(),
            };
        };
        Line::Sale {
            sale_id,
            product: product.to_string(),
            quantity: quantity.clone(),
            cost: Usd::new(price) * qty,
        }
    }

    /// Returns the cost of the sale, or `None` if it could not be priced.
    #[must_use]
    pub fn cost(&self) -> Option<Usd> {
        match self {
            Line::Sale { cost, .. } => Some(*cost),
            _ => None,
        }
    }

    /// Returns `true` if the sale could not be priced.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.cost().is_none()
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::NotFound { sale_id, product } => write!(
                f,
                "Product '{}' not found in catalogue (SALE_ID: {})",
                Echo(product),
                Echo(sale_id)
            ),
            Line::InvalidQuantity {
                sale_id,
                product,
                quantity,
            } => write!(
                f,
                "Invalid quantity '{}' for '{}' (SALE_ID: {})",
                Echo(quantity),
                Echo(product),
                Echo(sale_id)
            ),
            Line::Sale {
                sale_id,
                product,
                quantity,
                cost,
            } => write!(
                f,
                "SALE_ID {} - {product} x{quantity} = {cost}",
                Echo(sale_id)
            ),
        }
    }
}

/// Returns the quantity as a number, if it is one.
///
/// Strings, booleans, `null`, arrays and objects are not quantities, even
/// when they look like one (`"3"`).
fn numeric(value: &Value) -> Option<(&Number, f64)> {
    match value {
        Value::Number(n) => Some((n, n.as_f64()?)),
        _ => None,
    }
}

/// Shows a raw input value the way it was given: strings without quotes,
/// everything else as JSON.
struct Echo<'a>(&'a Value);

impl Display for Echo<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Value::String(s) => f.write_str(s),
            other => Display::fmt(other, f),
        }
    }
}

/// Holds the priced sales data.
///
/// To create a report from sale records, use [`reconcile`].
///
/// To get the report text, use its [`Display`] implementation: one line per
/// sale record, in input order, followed by a `TOTAL` line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    lines: Vec<Line>,
    total: Usd,
}

impl Report {
    /// Creates a new, empty report with a total of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prices `sale` against `prices`, and adds the outcome to the report.
    ///
    /// Records that cannot be priced are logged as warnings, and still get a
    /// line in the report.
    pub fn add_sale(&mut self, sale: &SaleRecord, prices: &PriceIndex) {
        let line = Line::price(sale, prices);
        match line.cost() {
            Some(cost) => self.total += cost,
            None => warn!("{line}"),
        }
        self.lines.push(line);
    }

    /// Returns the sum of the costs of every priced sale.
    #[must_use]
    pub fn total(&self) -> Usd {
        self.total
    }

    /// Returns one line per sale record, in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the number of sale records that could not be priced.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.lines.iter().filter(|line| line.is_error()).count()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "TOTAL = {}", self.total)
    }
}

/// Prices every record in `sales` against `prices`.
///
/// Every record gets exactly one line in the report, in input order, whether
/// or not it could be priced.
///
/// # Examples
///
/// ```
/// # use compute_sales::{reconcile, CatalogueEntry, PriceIndex, SaleRecord};
/// let prices = PriceIndex::build(&[CatalogueEntry::new("Pen", 2.5)]);
/// let sales: Vec<SaleRecord> = serde_json::from_str(
///     r#"[{"SALE_ID": 1, "Product": "Pen", "Quantity": 4},
///         {"SALE_ID": 2, "Product": "Book", "Quantity": 1}]"#,
/// )
/// .unwrap();
/// let report = reconcile(&sales, &prices);
/// assert_eq!(
///     report.to_string(),
///     "SALE_ID 1 - Pen x4 = $10.00\n\
///      Product 'Book' not found in catalogue (SALE_ID: 2)\n\
///      TOTAL = $10.00"
/// );
/// ```
pub fn reconcile<'a>(
    sales: impl IntoIterator<Item = &'a SaleRecord>,
    prices: &PriceIndex,
) -> Report {
    let mut report = Report::new();
    for sale in sales {
        report.add_sale(sale, prices);
    }
    report
}
