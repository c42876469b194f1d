//! Bulk import of product exports
//!
//! Consumes the JSON files produced by the product scraper: an array of
//! partial inventory rows, where unknown columns (price, stock count,
//! creator, image path and so on) ride along in each row's extension map.
//! Text columns are tidied before insertion and rows go to the backend in
//! fixed-size chunks; a rejected chunk is logged and skipped so the rest of
//! the import still runs.

use std::path::Path;

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use stockroom_api::NewItem;
use stockroom_store::InventoryRepository;

/// Rows per insert request.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Outcome of an import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    /// Rows read from the export file
    pub total: usize,
    /// Rows the backend created
    pub inserted: usize,
    /// Chunks the backend rejected
    pub failed_chunks: usize,
}

/// Cleanup applied to scraped text before it reaches the table.
struct Normalizer {
    whitespace: Regex,
    marketing: Regex,
}

impl Normalizer {
    fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
            // Listing pages append a "Buy X For Only $Y" blurb to the
            // description; strip it.
            marketing: Regex::new(r"(?i)Buy.*For Only.*$").unwrap(),
        }
    }

    /// Replace non-breaking spaces and stray line breaks, trim the ends.
    fn tidy(&self, text: &str) -> String {
        text.replace('\u{a0}', " ")
            .replace("\r\n", " ")
            .trim()
            .to_string()
    }

    fn compress(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }

    fn strip_marketing(&self, text: &str) -> String {
        self.marketing.replace(text, "").trim().to_string()
    }

    fn clean(&self, item: NewItem) -> NewItem {
        NewItem {
            name: item.name.map(|v| self.tidy(&v)),
            description: item
                .description
                .map(|v| self.tidy(&self.strip_marketing(&v))),
            kind: item.kind.map(|v| self.compress(&self.tidy(&v))),
            extra: item.extra,
        }
    }
}

/// Parse a JSON export: an array of partial rows.
pub fn parse_records(content: &str) -> eyre::Result<Vec<NewItem>> {
    Ok(serde_json::from_str(content)?)
}

/// Normalize and insert records in chunks. Chunks the backend rejects are
/// skipped; the store has already logged the diagnostic for each.
pub async fn insert_chunks<S: InventoryRepository>(
    store: &S,
    items: Vec<NewItem>,
    chunk_size: usize,
) -> ImportSummary {
    let normalizer = Normalizer::new();
    let items: Vec<NewItem> = items
        .into_iter()
        .map(|item| normalizer.clean(item))
        .collect();

    let total = items.len();
    let mut inserted = 0;
    let mut failed_chunks = 0;

    for chunk in items.chunks(chunk_size.max(1)) {
        match store.insert_many(chunk.to_vec()).await {
            Ok(rows) => {
                inserted += rows.len();
                info!(rows = rows.len(), "inserted chunk");
            }
            Err(err) => {
                failed_chunks += 1;
                warn!(error = %err, rows = chunk.len(), "skipping rejected chunk");
            }
        }
    }

    ImportSummary {
        total,
        inserted,
        failed_chunks,
    }
}

/// Import a JSON export file into the inventory table.
///
/// # Errors
/// Returns error if the file cannot be read or parsed. Backend rejections
/// do not abort the run; they are counted in the summary.
pub async fn run<S: InventoryRepository>(
    store: &S,
    path: &Path,
    chunk_size: usize,
) -> eyre::Result<ImportSummary> {
    let content = std::fs::read_to_string(path)?;
    let items = parse_records(&content)?;
    info!(rows = items.len(), path = %path.display(), "importing product export");
    Ok(insert_chunks(store, items, chunk_size).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockroom_store::MemoryInventory;

    #[test]
    fn tidy_strips_nbsp_and_line_breaks() {
        let n = Normalizer::new();
        assert_eq!(n.tidy(" Red\u{a0}Pot\r\n "), "Red Pot");
    }

    #[test]
    fn compress_collapses_whitespace_runs() {
        let n = Normalizer::new();
        assert_eq!(n.compress("Board \t Game"), "Board Game");
    }

    #[test]
    fn marketing_blurb_is_stripped_case_insensitively() {
        let n = Normalizer::new();
        assert_eq!(
            n.strip_marketing("A fine game. buy Monopoly for only $5.99!"),
            "A fine game."
        );
        assert_eq!(n.strip_marketing("No blurb here"), "No blurb here");
    }

    #[test]
    fn clean_touches_text_columns_only() {
        let n = Normalizer::new();
        let item: NewItem = serde_json::from_value(json!({
            "name": "Red\u{a0}Pot",
            "type": "Board   Game",
            "price": 12.5,
            "in_stock": 3
        }))
        .unwrap();

        let cleaned = n.clean(item);
        assert_eq!(cleaned.name.as_deref(), Some("Red Pot"));
        assert_eq!(cleaned.kind.as_deref(), Some("Board Game"));
        assert_eq!(cleaned.extra.get("price"), Some(&json!(12.5)));
        assert_eq!(cleaned.extra.get("in_stock"), Some(&json!(3)));
    }

    #[test]
    fn parse_records_accepts_a_scraper_export() {
        let records = parse_records(
            r#"[
                {"name": "Monopoly", "type": "Board Game", "price": 12.5, "created_by": "Hasbro"},
                {"name": "Risk", "description": "World conquest"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Monopoly"));
        assert_eq!(records[0].extra.get("created_by"), Some(&json!("Hasbro")));
    }

    #[tokio::test]
    async fn insert_chunks_covers_every_row() {
        let store = MemoryInventory::new();
        let items: Vec<NewItem> = (0..5).map(|i| NewItem::named(format!("item {i}"))).collect();

        let summary = insert_chunks(&store, items, 2).await;
        assert_eq!(summary.total, 5);
        assert_eq!(summary.inserted, 5);
        assert_eq!(summary.failed_chunks, 0);

        assert_eq!(store.list(100).await.unwrap().len(), 5);
    }
}
