//! Query variables shared by the category and pricing queries, and the
//! cache policy they are sent with.

use serde::{Deserialize, Serialize};

use crate::{
    filter_set::FilterSet,
    graphql_id::{CATEGORY_TYPE, graphql_id_from_db_id},
    listing_const::PRODUCTS_PER_PAGE,
    sort::SortSpec,
};

/// Whether a request may be answered from the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchPolicy {
    #[default]
    CacheFirst,
    /// Always hit the network; the fresh response still refreshes the cache.
    NetworkOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInput {
    pub slug: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQueryVariables {
    /// Global id of the category.
    pub id: String,
    pub attributes: Vec<AttributeInput>,
    pub sort_by: SortSpec,
    pub page_size: u32,
    pub after: Option<String>,
    pub price_gte: Option<f64>,
    pub price_lte: Option<f64>,
}

/// One attribute input per selected value.
pub fn attribute_inputs(filters: &FilterSet) -> Vec<AttributeInput> {
    filters
        .iter()
        .flat_map(|(slug, values)| {
            values.iter().map(move |value| AttributeInput { slug: slug.to_string(), values: vec![value.clone()] })
        })
        .collect()
}

impl ListingQueryVariables {
    pub fn new(category_db_id: &str, filters: &FilterSet, sort: SortSpec) -> Self {
        Self {
            id: graphql_id_from_db_id(category_db_id, CATEGORY_TYPE),
            attributes: attribute_inputs(filters),
            sort_by: sort,
            page_size: PRODUCTS_PER_PAGE,
            after: None,
            price_gte: None,
            price_lte: None,
        }
    }

    /// The same query continued after `cursor`.
    pub fn with_after(&self, cursor: impl Into<String>) -> Self {
        Self { after: Some(cursor.into()), ..self.clone() }
    }
}
