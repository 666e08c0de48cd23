//! What the category page renders at a given moment.

use common::{
    listing::{ActiveFilterLabel, ListingResult},
    sort::SortSpec,
    url_state::ListingUrlState,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingView {
    /// A fetch for the current generation has not completed yet.
    #[default]
    Loading,
    Ready(ListingResult),
    /// The category id does not resolve.
    NotFound,
    /// The catalog API could not be reached.
    Offline,
    Error(String),
}

impl ListingView {
    pub fn result(&self) -> Option<&ListingResult> {
        match self {
            ListingView::Ready(result) => Some(result),
            _ => None,
        }
    }
}

/// Everything the presentation layer reads from the listing controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub view: ListingView,
    /// Bumped whenever the committed view materially changes.
    pub revision: u64,
    pub generation: u64,
    pub url_state: ListingUrlState,
    pub url_query: String,
    pub sort: SortSpec,
    pub active_filter_count: usize,
    pub active_filters: Vec<ActiveFilterLabel>,
    pub loading_more: bool,
    pub can_load_more: bool,
}
