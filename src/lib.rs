#![doc = include_str!("../README.md")]
mod catalogue;
mod files;
mod report;
#[cfg(test)]
mod testing;
mod usd;

pub use catalogue::{CatalogueEntry, Lookup, PriceIndex};
pub use files::{load_json, output_path_for, write_report, REPORT_FILE_NAME};
pub use report::{reconcile, Line, Report, SaleRecord};
pub use usd::Usd;
