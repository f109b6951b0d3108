mod meta;
pub use self::meta::{ChangesMeta, Meta};

mod offer;
pub use self::offer::{ChangeIdResponse, ChangesResponse, OfferItem, OffersResponse};

use serde::{Deserialize, Deserializer};

/// Decodes `null` as the type's default, so `"created_at": null` becomes `""`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
