mod common;
pub use self::common::Query;

mod offers;
pub use self::offers::OffersQuery;
