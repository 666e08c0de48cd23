use common::{
    graphql_id::{CATEGORY_TYPE, db_id_from_graphql_id},
    listing::Breadcrumb,
    url_state::ListingUrlState,
};
use dioxus::prelude::*;

use crate::pages::category_page::CategoryPage;
use crate::pages::not_found_page::NotFoundPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/category/:slug/:category_id?:sortBy&:filters")]
    CategoryPage {
        slug: String,
        category_id: String,
        sortBy: String,
        filters: String,
    },


    #[route("/:..segments")]
    NotFoundPage { segments: Vec<String> },
}

impl Route {
    pub fn category_page(slug: &str, category_id: &str, url_state: &ListingUrlState) -> Self {
        Self::CategoryPage {
            slug: slug.to_string(),
            category_id: category_id.to_string(),
            sortBy: url_state.sort_by.clone().unwrap_or_default(),
            filters: url_state.filters.encode(),
        }
    }

    /// Unfiltered page of a breadcrumb's category. `None` when the id is not
    /// a category id.
    pub fn from_breadcrumb(breadcrumb: &Breadcrumb) -> Option<Self> {
        let category_id = db_id_from_graphql_id(&breadcrumb.id, CATEGORY_TYPE).ok()?;
        Some(Self::category_page(&category_slug(&breadcrumb.name), &category_id, &ListingUrlState::default()))
    }
}

/// Lowercase name with every run of other characters collapsed to `-`.
pub fn category_slug(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
