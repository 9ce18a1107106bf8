//! # Catalog Loader
//!
//! One-shot read of the static product catalog.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Failure                          try_load_products   load_products    │
//! │  ───────                          ─────────────────   ─────────────    │
//! │  File missing / unreadable        Err(Io)             []  + warn       │
//! │  Read slower than timeout         Err(Timeout)        []  + warn       │
//! │  Not JSON                         Err(Parse)          []  + warn       │
//! │  JSON but not an array            Err(NotAnArray)     []  + warn       │
//! │  One bad record in the array      record skipped      record skipped   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never learns whether retrieval failed; it just gets fewer (or no)
//! products.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use storefront_core::validation::validate_product;
use storefront_core::{Product, ValidationError};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// Where the catalog lives when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "./data/products.json";

/// Default upper bound on the catalog read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Configuration
// =============================================================================

/// Catalog location and read policy.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use storefront_catalog::CatalogSource;
///
/// let source = CatalogSource::new("data/products.json")
///     .timeout(Duration::from_secs(2));
/// assert_eq!(source.timeout, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    /// Path to the JSON catalog file.
    pub path: PathBuf,

    /// Maximum time allowed for the read.
    /// Default: 5 seconds
    pub timeout: Duration,
}

impl CatalogSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CatalogSource {
            path: path.as_ref().to_path_buf(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Reads and parses the catalog, reporting why it failed.
pub async fn try_load_products(source: &CatalogSource) -> CatalogResult<Vec<Product>> {
    debug!(path = %source.path.display(), timeout = ?source.timeout, "reading catalog");

    let read = tokio::fs::read_to_string(&source.path);
    let contents = match tokio::time::timeout(source.timeout, read).await {
        Ok(Ok(contents)) => contents,
        Ok(Err(err)) => {
            return Err(CatalogError::Io {
                path: source.path.clone(),
                source: err,
            })
        }
        Err(_) => {
            return Err(CatalogError::Timeout {
                path: source.path.clone(),
                timeout: source.timeout,
            })
        }
    };

    let products = parse_products(&contents)?;
    info!(
        path = %source.path.display(),
        count = products.len(),
        "catalog loaded"
    );
    Ok(products)
}

/// Reads the catalog, treating any failure as an empty catalog.
pub async fn load_products(source: &CatalogSource) -> Vec<Product> {
    match try_load_products(source).await {
        Ok(products) => products,
        Err(err) => {
            warn!(error = %err, "catalog unavailable, showing an empty storefront");
            Vec::new()
        }
    }
}

/// Parses a catalog payload.
///
/// Records that do not deserialize, fail validation, or repeat an earlier
/// id are skipped with a warning. Order of the remaining records is kept.
///
/// ## Example
/// ```rust
/// use storefront_catalog::parse_products;
///
/// let json = r#"[
///     {"id": "p1", "title": "Widget", "priceCents": 500},
///     {"id": "",   "title": "Broken", "priceCents": 100}
/// ]"#;
/// let products = parse_products(json).unwrap();
/// assert_eq!(products.len(), 1);
/// assert_eq!(products[0].id, "p1");
/// ```
pub fn parse_products(json: &str) -> CatalogResult<Vec<Product>> {
    let records = match serde_json::from_str::<Value>(json)? {
        Value::Array(records) => records,
        other => {
            return Err(CatalogError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let product: Product = match serde_json::from_value(record) {
            Ok(product) => product,
            Err(err) => {
                warn!(index, error = %err, "skipping malformed catalog record");
                continue;
            }
        };

        if let Err(err) = validate_product(&product) {
            warn!(index, id = %product.id, error = %err, "skipping invalid catalog record");
            continue;
        }

        if !seen.insert(product.id.clone()) {
            let err = ValidationError::Duplicate {
                field: "id".to_string(),
                value: product.id.clone(),
            };
            warn!(index, error = %err, "skipping duplicate catalog record");
            continue;
        }

        products.push(product);
    }

    Ok(products)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": "p1", "title": "Widget", "desc": "A widget", "priceCents": 500,
         "img": "img/widget.png", "alt": "Widget photo"},
        {"id": "p2", "title": "Gadget", "description": "A gadget", "priceCents": 1250,
         "imageUrl": "img/gadget.png", "altText": "Gadget photo"}
    ]"#;

    /// Writes `contents` to a per-test file in the temp dir.
    async fn write_catalog(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "storefront-catalog-{}-{}.json",
            std::process::id(),
            name
        ));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[test]
    fn test_parse_both_key_spellings() {
        let products = parse_products(SAMPLE).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].description, "A widget");
        assert_eq!(products[0].image_url, "img/widget.png");
        assert_eq!(products[1].alt_text, "Gadget photo");
        assert_eq!(products[1].price_cents, 1250);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_products("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_products(r#"{"products": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray { found: "object" }));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_products("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_parse_skips_bad_records() {
        let json = r#"[
            {"id": "p1", "title": "Widget", "priceCents": 500},
            {"id": "p2", "title": "No price"},
            {"id": "p3", "title": "Negative", "priceCents": -1},
            {"id": "p4", "title": "   ", "priceCents": 100},
            "just a string",
            {"id": "p1", "title": "Widget again", "priceCents": 700},
            {"id": "p5", "title": "Free sticker", "priceCents": 0}
        ]"#;

        let products = parse_products(json).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["p1", "p5"]);
        assert_eq!(products[0].title, "Widget");
    }

    #[test]
    fn test_parse_skips_overlong_id_and_title() {
        let json = format!(
            r#"[
                {{"id": "{}", "title": "Long id", "priceCents": 100}},
                {{"id": "p2", "title": "{}", "priceCents": 100}},
                {{"id": "{}", "title": "{}", "priceCents": 100}}
            ]"#,
            "i".repeat(65),
            "t".repeat(201),
            "i".repeat(64),
            "t".repeat(200)
        );

        let products = parse_products(&json).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.len(), 64);
    }

    #[test]
    fn test_source_defaults() {
        let source = CatalogSource::default();
        assert_eq!(source.path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(source.timeout, DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = write_catalog("ok", SAMPLE).await;

        let products = try_load_products(&CatalogSource::new(&path)).await.unwrap();
        assert_eq!(products.len(), 2);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = CatalogSource::new("/definitely/not/here/products.json");

        let err = try_load_products(&source).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_products_falls_back_to_empty() {
        let missing = CatalogSource::new("/definitely/not/here/products.json");
        assert!(load_products(&missing).await.is_empty());

        let path = write_catalog("object", r#"{"id": "p1"}"#).await;
        assert!(load_products(&CatalogSource::new(&path)).await.is_empty());
        tokio::fs::remove_file(&path).await.unwrap();
    }

    /// Opens and drops the write end of `fifo`, releasing a blocked reader.
    #[cfg(unix)]
    fn release_reader(fifo: &Path) {
        drop(std::fs::OpenOptions::new().write(true).open(fifo).unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_blocked_read_times_out() {
        let fifo = std::env::temp_dir().join(format!(
            "storefront-catalog-{}-fifo.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&fifo);
        let status = std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .unwrap();
        assert!(status.success());

        // No writer, so opening the pipe for reading blocks.
        let source = CatalogSource::new(&fifo).timeout(Duration::from_millis(50));

        let err = try_load_products(&source).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Timeout { timeout, .. } if timeout == Duration::from_millis(50)
        ));
        release_reader(&fifo);

        assert!(load_products(&source).await.is_empty());
        release_reader(&fifo);

        std::fs::remove_file(&fifo).unwrap();
    }
}
