//! Category listing queries.

pub mod listing_wire;

mod category_listing;
pub use category_listing::{CATEGORY_LISTING_OPERATION, category_listing_query, fetch_category_listing};

mod product_prices;
pub use product_prices::{PRODUCT_PRICES_OPERATION, PRODUCT_PRICES_QUERY, fetch_product_prices};
