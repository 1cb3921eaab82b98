use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A previously uploaded binary that can be reused. Only ever listed and selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryAsset {
    #[serde(alias = "url")]
    pub address: String,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}
