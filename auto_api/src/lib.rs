//! Async client for the auto-api.com car listings API.
//!
//! Covers source filters, paginated offer search, single offer lookup, the
//! change feed and offer resolution by marketplace URL. See [`Client`].

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{cancellable, Client, ClientBuilder, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{OffersQuery, Query};
