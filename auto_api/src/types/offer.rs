use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{ChangesMeta, Meta};

/// A single listing or change event.
///
/// `data` is kept as raw JSON because its shape differs between sources;
/// use [`OfferItem::data_as`] to decode it into your own type.
///
/// Missing or `null` fields decode to their defaults (`0`, `""`, `Value::Null`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OfferItem {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub inner_id: String,
    /// Free-form tag such as `added`, `changed` or `removed`.
    #[serde(deserialize_with = "super::null_as_default")]
    pub change_type: String,
    /// Timestamp as sent by the API, not parsed.
    #[serde(deserialize_with = "super::null_as_default")]
    pub created_at: String,
    pub data: serde_json::Value,
}

impl OfferItem {
    /// Decodes the source-specific payload.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

/// Response of the offers listing and single-offer endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OffersResponse {
    #[serde(deserialize_with = "super::null_as_default")]
    pub result: Vec<OfferItem>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub meta: Meta,
}

/// Response of the changes feed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChangesResponse {
    #[serde(deserialize_with = "super::null_as_default")]
    pub result: Vec<OfferItem>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub meta: ChangesMeta,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeIdResponse {
    pub change_id: i64,
}
