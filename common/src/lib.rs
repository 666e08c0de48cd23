//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod filter_set;
pub mod sort;
pub mod url_state;
pub mod listing;
pub mod listing_const;
pub mod graphql_id;
pub mod listing_query;
pub mod catalog_error;
