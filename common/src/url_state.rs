//! Listing state persisted in the page URL.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{
    filter_set::{FilterSet, MalformedFilterToken},
    sort::SortSpec,
};

pub const SORT_BY_PARAM: &str = "sortBy";
pub const FILTERS_PARAM: &str = "filters";

/// The `sortBy` and `filters` query parameters of a category page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingUrlState {
    /// Raw sort token, kept as written so the URL survives unknown tokens.
    pub sort_by: Option<String>,
    pub filters: FilterSet,
}

impl ListingUrlState {
    pub fn from_query(query: &str) -> Self {
        Self::from_query_with_rejects(query).0
    }

    /// Parse a query string, ignoring unrelated parameters. Returns the
    /// filter segments that could not be decoded.
    pub fn from_query_with_rejects(query: &str) -> (Self, Vec<MalformedFilterToken>) {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut sort_by = String::new();
        let mut filters = String::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                SORT_BY_PARAM => sort_by = value.into_owned(),
                FILTERS_PARAM => filters = value.into_owned(),
                _ => {}
            }
        }
        Self::from_params(&sort_by, &filters)
    }

    /// Build the state from already-decoded `sortBy` and `filters` values,
    /// as a router hands them over. Empty values mean unset.
    pub fn from_params(sort_by: &str, filters: &str) -> (Self, Vec<MalformedFilterToken>) {
        let (filters, rejects) = FilterSet::decode_with_rejects(filters);
        let sort_by = Some(sort_by.to_string()).filter(|v| !v.is_empty());
        (Self { sort_by, filters }, rejects)
    }

    /// Serialise back to a query string without the leading `?`. Empty
    /// parameters are omitted.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair(SORT_BY_PARAM, sort_by);
        }
        if !self.filters.is_empty() {
            serializer.append_pair(FILTERS_PARAM, &self.filters.encode());
        }
        serializer.finish()
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::resolve(self.sort_by.as_deref())
    }

    pub fn set_sort(&mut self, token: Option<&str>) {
        self.sort_by = token.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
    }

    /// The state after selecting or deselecting one attribute value.
    pub fn with_toggled_filter(&self, attribute_key: &str, value_id: &str) -> Self {
        Self { sort_by: self.sort_by.clone(), filters: self.filters.toggled(attribute_key, value_id) }
    }

    /// The state with every filter removed and the sort kept.
    pub fn without_filters(&self) -> Self {
        Self { sort_by: self.sort_by.clone(), filters: FilterSet::new() }
    }

    pub fn with_sort(&self, token: Option<&str>) -> Self {
        let mut next = self.clone();
        next.set_sort(token);
        next
    }
}
