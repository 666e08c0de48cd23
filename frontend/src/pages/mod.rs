pub mod category_page;
pub mod not_found_page;
