pub mod listing_view;
