//! Inventory repository
//!
//! Six operations over the `inventory` table. The hosted backend owns all
//! storage, indexing and constraint enforcement; each operation here is one
//! stateless request/response round trip. Failures are logged once and then
//! returned to the caller unchanged, with no retry and no fallback.

use async_trait::async_trait;
use url::Url;

use stockroom_api::{InventoryItem, ItemPatch, NewItem};

use crate::error::{Operation, Result, StoreError, log_failure};
use crate::supabase::SupabaseClient;

/// Default number of rows returned by [`InventoryRepository::list`].
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// The table every operation targets.
const TABLE: &str = "inventory";

/// Columns searched by [`InventoryRepository::search`].
const SEARCH_COLUMNS: [&str; 3] = ["name", "description", "type"];

/// Abstract inventory persistence.
///
/// Implementations: [`SupabaseInventory`] for the hosted backend,
/// [`MemoryInventory`](crate::memory::MemoryInventory) for tests and
/// offline use.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Fetch up to `limit` rows in the backend's default order.
    async fn list(&self, limit: u32) -> Result<Vec<InventoryItem>>;

    /// Fetch the single row with the given id; errors unless exactly one
    /// row matches.
    async fn get(&self, id: &str) -> Result<InventoryItem>;

    /// Fetch rows whose name, description or type contains `term`,
    /// case-insensitively. The term is passed to the backend verbatim, so
    /// pattern characters (`%`, `_`, `*`) keep their wildcard meaning.
    async fn search(&self, term: &str) -> Result<Vec<InventoryItem>>;

    /// Insert a row, returning the created row(s) with backend-assigned
    /// fields populated.
    async fn insert(&self, item: NewItem) -> Result<Vec<InventoryItem>>;

    /// Insert a batch of rows in a single request, returning the created
    /// rows. Used by bulk imports; the backend applies the same constraints
    /// as [`insert`](Self::insert), to the batch as a whole.
    async fn insert_many(&self, items: Vec<NewItem>) -> Result<Vec<InventoryItem>>;

    /// Apply a partial update to the row with the given id, returning the
    /// updated row(s). Errors if no row matches.
    async fn update(&self, id: &str, patch: ItemPatch) -> Result<Vec<InventoryItem>>;

    /// Delete the row with the given id, returning the deleted row(s).
    /// The acknowledgement may be empty.
    async fn delete(&self, id: &str) -> Result<Vec<InventoryItem>>;
}

/// Inventory repository backed by the hosted PostgREST backend
///
/// # Example
/// ```no_run
/// use stockroom_store::{InventoryRepository, SupabaseInventory};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SupabaseInventory::new("https://example.supabase.co", "anon-key")?;
/// let items = store.search("terracotta").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SupabaseInventory {
    client: SupabaseClient,
    table: Url,
}

impl SupabaseInventory {
    /// Create a repository from the project URL and the anonymous-tier key.
    ///
    /// # Errors
    /// Returns an error if the project URL is invalid.
    pub fn new(project_url: impl AsRef<str>, anon_key: impl Into<String>) -> Result<Self> {
        Self::with_client(SupabaseClient::new(project_url, anon_key)?)
    }

    /// Create a repository over an existing [`SupabaseClient`].
    ///
    /// # Errors
    /// Returns an error if the table URL cannot be built.
    pub fn with_client(client: SupabaseClient) -> Result<Self> {
        let table = client.table_url(TABLE)?;
        Ok(Self { client, table })
    }

    fn list_url(&self, limit: u32) -> Url {
        let mut url = self.table.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("limit", &limit.to_string());
        url
    }

    fn get_url(&self, id: &str) -> Url {
        let mut url = self.table.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &format!("eq.{id}"));
        url
    }

    fn search_url(&self, term: &str) -> Url {
        // `*` is PostgREST's URL alias for the `%` wildcard. The term is
        // embedded verbatim; wildcard characters it contains pass through.
        let filters: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|column| format!("{column}.ilike.*{term}*"))
            .collect();

        let mut url = self.table.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("or", &format!("({})", filters.join(",")));
        url
    }

    fn match_url(&self, id: &str) -> Url {
        let mut url = self.table.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        url
    }
}

#[async_trait]
impl InventoryRepository for SupabaseInventory {
    async fn list(&self, limit: u32) -> Result<Vec<InventoryItem>> {
        self.client
            .rows(Operation::List, self.list_url(limit))
            .await
            .map_err(log_failure)
    }

    async fn get(&self, id: &str) -> Result<InventoryItem> {
        self.client
            .single(Operation::Get, self.get_url(id))
            .await
            .map_err(log_failure)
    }

    async fn search(&self, term: &str) -> Result<Vec<InventoryItem>> {
        self.client
            .rows(Operation::Search, self.search_url(term))
            .await
            .map_err(log_failure)
    }

    async fn insert(&self, item: NewItem) -> Result<Vec<InventoryItem>> {
        self.client
            .create(Operation::Insert, self.table.clone(), &item)
            .await
            .map_err(log_failure)
    }

    async fn insert_many(&self, items: Vec<NewItem>) -> Result<Vec<InventoryItem>> {
        // PostgREST accepts an array body for bulk inserts.
        self.client
            .create(Operation::Insert, self.table.clone(), &items)
            .await
            .map_err(log_failure)
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> Result<Vec<InventoryItem>> {
        let rows: Vec<InventoryItem> = self
            .client
            .modify(Operation::Update, self.match_url(id), &patch)
            .await
            .map_err(log_failure)?;

        // PostgREST answers 200 with an empty representation when the
        // filter matched nothing; surface that as not-found.
        if rows.is_empty() {
            return Err(log_failure(StoreError::NotFound { id: id.to_string() }));
        }
        Ok(rows)
    }

    async fn delete(&self, id: &str) -> Result<Vec<InventoryItem>> {
        self.client
            .remove(Operation::Delete, self.match_url(id))
            .await
            .map_err(log_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseInventory {
        SupabaseInventory::new("https://example.supabase.co", "anon-key").unwrap()
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_list_url() {
        let url = store().list_url(5);
        assert_eq!(
            url.as_str(),
            "https://example.supabase.co/rest/v1/inventory?select=*&limit=5"
        );
    }

    #[test]
    fn test_get_url_filters_on_id() {
        let url = store().get_url("abc-123");
        assert_eq!(
            pairs(&url),
            vec![
                ("select".to_string(), "*".to_string()),
                ("id".to_string(), "eq.abc-123".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_url_builds_disjunction() {
        let url = store().search_url("pot");
        assert_eq!(
            pairs(&url),
            vec![
                ("select".to_string(), "*".to_string()),
                (
                    "or".to_string(),
                    "(name.ilike.*pot*,description.ilike.*pot*,type.ilike.*pot*)".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_search_term_wildcards_pass_through() {
        // Pattern characters in the term are not escaped; this is the
        // documented contract, not an oversight.
        let url = store().search_url("100%_cotton");
        let or = pairs(&url).into_iter().find(|(k, _)| k == "or").unwrap().1;
        assert!(or.contains("name.ilike.*100%_cotton*"));
    }

    #[test]
    fn test_match_url_has_no_select() {
        let url = store().match_url("abc-123");
        assert_eq!(
            pairs(&url),
            vec![("id".to_string(), "eq.abc-123".to_string())]
        );
    }
}
