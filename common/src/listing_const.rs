/// Products fetched per page of a category listing.
pub const PRODUCTS_PER_PAGE: u32 = 40;
/// Filterable attributes fetched with the category.
pub const ATTRIBUTES_PAGE_SIZE: u32 = 100;
/// Ancestors fetched for the breadcrumb trail.
pub const BREADCRUMB_ANCESTORS: u32 = 5;
