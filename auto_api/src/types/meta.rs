use serde::{Deserialize, Serialize};

/// Pagination metadata for offer listings. Missing or `null` fields read as `0`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Meta {
    #[serde(deserialize_with = "super::null_as_default")]
    pub page: i64,
    /// Next page number, `0` when this is the last page.
    #[serde(deserialize_with = "super::null_as_default")]
    pub next_page: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub limit: i64,
}

impl Meta {
    /// Returns the next page to request, or `None` once the listing is exhausted.
    pub fn next_page(&self) -> Option<i64> {
        match self.next_page {
            0 => None,
            page => Some(page),
        }
    }
}

/// Cursor metadata for the changes feed. Missing or `null` fields read as `0`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ChangesMeta {
    #[serde(deserialize_with = "super::null_as_default")]
    pub cur_change_id: i64,
    /// Cursor of the following batch, `0` when the feed is caught up.
    #[serde(deserialize_with = "super::null_as_default")]
    pub next_change_id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub limit: i64,
}

impl ChangesMeta {
    /// Returns the cursor for the next batch, or `None` when there is nothing newer.
    pub fn next_change_id(&self) -> Option<i64> {
        match self.next_change_id {
            0 => None,
            id => Some(id),
        }
    }
}
