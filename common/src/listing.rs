//! Category listing view model shared by the catalog client and the listing
//! controller.

use serde::{Deserialize, Serialize};

use crate::filter_set::FilterSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAncestor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetails {
    pub id: String,
    pub name: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub background_image_url: Option<String>,
    /// Nearest ancestors, root first.
    pub ancestors: Vec<CategoryAncestor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: String,
    pub name: String,
}

impl CategoryDetails {
    /// Ancestors followed by the category itself.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.ancestors
            .iter()
            .map(|a| Breadcrumb { id: a.id.clone(), name: a.name.clone() })
            .chain(std::iter::once(Breadcrumb { id: self.id.clone(), name: self.name.clone() }))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Attribute offered in the filter sidebar of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterableAttribute {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub values: Vec<AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// Lowest net price of the product's variants.
    pub start_net: Option<Money>,
    pub on_sale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductThumbnail {
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductNode {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<ProductThumbnail>,
    pub pricing: Option<ProductPricing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEdge {
    pub cursor: String,
    pub node: ProductNode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductConnection {
    pub total_count: u64,
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
}

/// Result of the category metadata query. `category` is `None` when the id
/// does not resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub category: Option<CategoryDetails>,
    pub attributes: Vec<FilterableAttribute>,
    pub products: ProductConnection,
}

/// Result of the priced product list query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingPayload {
    pub products: ProductConnection,
}

/// Merged listing rendered by a category page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResult {
    pub category: CategoryDetails,
    pub attributes: Vec<FilterableAttribute>,
    pub products: ProductConnection,
}

impl ListingResult {
    pub fn can_load_more(&self) -> bool {
        self.products.page_info.has_next_page && self.products.page_info.end_cursor.is_some()
    }
}

/// An active filter resolved to its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilterLabel {
    pub attribute_slug: String,
    pub value_slug: String,
    pub value_name: String,
}

/// Resolve every selected value to the name the catalog gives it, falling
/// back to the slug for values the attribute list does not know.
pub fn active_filter_labels(filters: &FilterSet, attributes: &[FilterableAttribute]) -> Vec<ActiveFilterLabel> {
    let mut labels = Vec::new();
    for (attribute_slug, value_slugs) in filters.iter() {
        let attribute = attributes.iter().find(|a| a.slug == attribute_slug);
        for value_slug in value_slugs {
            let value_name = attribute
                .and_then(|a| a.values.iter().find(|v| &v.slug == value_slug))
                .map(|v| v.name.clone())
                .unwrap_or_else(|| value_slug.clone());
            labels.push(ActiveFilterLabel {
                attribute_slug: attribute_slug.to_string(),
                value_slug: value_slug.clone(),
                value_name,
            });
        }
    }
    labels
}
