pub mod category_listing_view;
pub mod listing_breadcrumbs;
pub mod listing_filters;
pub mod listing_sort_select;
pub mod product_list;
