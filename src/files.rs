use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

/// The file name of the report written beside the sales data.
pub const REPORT_FILE_NAME: &str = "SalesResults.txt";

/// Reads and parses the JSON file at `path`.
///
/// # Errors
///
/// Returns errors if:
/// * The file cannot be opened
/// * The file is not valid JSON
/// * The JSON does not have the shape of `T` (for example, an object where a
///   list of records is expected)
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    let data = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        let problem = match e.classify() {
            Category::Data => "unexpected structure",
            Category::Io => "read failed",
            Category::Syntax | Category::Eof => "not valid JSON",
        };
        anyhow::Error::new(e).context(format!("{}: {problem}", path.display()))
    })?;
    debug!("loaded {}", path.display());
    Ok(data)
}

/// Returns the default report path for the sales data at `sales_path`: a file
/// named [`REPORT_FILE_NAME`] in the same directory.
#[must_use]
pub fn output_path_for(sales_path: impl AsRef<Path>) -> PathBuf {
    sales_path
        .as_ref()
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(REPORT_FILE_NAME)
}

/// Writes `text` to `path`, creating any missing parent directories.
///
/// # Errors
///
/// Returns any errors from creating the directories or writing the file.
pub fn write_report(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use crate::{catalogue::CatalogueEntry, report::SaleRecord};

    use super::*;

    #[test]
    fn load_json_fn_reads_catalogue_file() {
        let catalogue: Vec<CatalogueEntry> = load_json("testdata/catalogue.json").unwrap();
        assert_eq!(catalogue.len(), 5);
        assert_eq!(catalogue[0].priced(), Some(("Pen", 2.5)));
        assert_eq!(catalogue[2].priced(), None);
    }

    #[test]
    fn load_json_fn_reads_sales_file() {
        let sales: Vec<SaleRecord> = load_json("testdata/sales.json").unwrap();
        assert_eq!(sales.len(), 4);
        assert_eq!(sales[2].quantity, "3");
    }

    #[test]
    fn load_json_fn_returns_error_for_missing_file() {
        let err = load_json::<Vec<SaleRecord>>("testdata/bogus.json").unwrap_err();
        assert!(err.to_string().contains("testdata/bogus.json"), "{err}");
    }

    #[test]
    fn load_json_fn_returns_error_for_invalid_json() {
        let err = load_json::<Vec<SaleRecord>>("testdata/broken.json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"), "{err}");
    }

    #[test]
    fn load_json_fn_returns_error_for_wrong_structure() {
        let err = load_json::<Vec<SaleRecord>>("testdata/object.json").unwrap_err();
        assert!(err.to_string().contains("unexpected structure"), "{err}");
    }

    #[test]
    fn output_path_for_fn_puts_report_beside_sales_file() {
        assert_eq!(
            output_path_for("data/TC1/sales.json"),
            Path::new("data/TC1/SalesResults.txt")
        );
        assert_eq!(output_path_for("sales.json"), Path::new("SalesResults.txt"));
    }

    #[test]
    fn write_report_fn_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results/TC1").join(REPORT_FILE_NAME);
        write_report(&path, "TOTAL = $0.00").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "TOTAL = $0.00");
    }

    #[test]
    fn write_report_fn_overwrites_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        write_report(&path, "old report").unwrap();
        write_report(&path, "TOTAL = $1.00").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "TOTAL = $1.00");
    }
}
