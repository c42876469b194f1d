//! Inventory row types
//!
//! The backend owns the `inventory` table schema; these types are a typed
//! projection over the columns the application actually touches. Columns we
//! do not know about are kept in the flattened `extra` map so a row survives
//! a fetch/modify/store cycle without losing fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row in the `inventory` table.
///
/// `id` and `created_at` are assigned by the backend. The `type` column is
/// exposed as `kind` because `type` is a keyword in Rust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Columns not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A partial item for insertion. The backend fills in `id`, `created_at`,
/// and any column defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewItem {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A partial update. `None` fields are omitted from the serialized body, so
/// the backend only touches the columns that were provided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_keeps_unknown_columns() {
        let row = json!({
            "id": "a1",
            "name": "Red Pot",
            "type": "planter",
            "price": 12.5,
            "in_stock": true
        });

        let item: InventoryItem = serde_json::from_value(row.clone()).unwrap();
        assert_eq!(item.kind.as_deref(), Some("planter"));
        assert_eq!(item.extra.get("price"), Some(&json!(12.5)));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = ItemPatch {
            description: Some("terracotta pot".into()),
            ..ItemPatch::default()
        };

        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({ "description": "terracotta pot" }));
    }

    #[test]
    fn kind_serializes_as_type_column() {
        let item = NewItem {
            kind: Some("cookware".into()),
            ..NewItem::named("Pan")
        };

        let body = serde_json::to_value(&item).unwrap();
        assert_eq!(body, json!({ "name": "Pan", "type": "cookware" }));
    }
}
