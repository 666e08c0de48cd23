//! Response shapes of the listing queries and their conversion into the
//! shared listing model.

use common::listing::{
    AttributeValue, CategoryAncestor, CategoryDetails, FilterableAttribute, Money, PageInfo,
    ProductConnection, ProductEdge, ProductNode, ProductPricing, ProductThumbnail,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WireConnection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<WireEdge<T>>,
}

impl<T> Default for WireConnection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireEdge<T> {
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct WireImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireNamed {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub background_image: Option<WireImage>,
    #[serde(default)]
    pub ancestors: Option<WireConnection<WireNamed>>,
}

#[derive(Debug, Deserialize)]
pub struct WireAttributeValue {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct WireAttribute {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub values: Vec<Option<WireAttributeValue>>,
}

#[derive(Debug, Deserialize)]
pub struct WireMoney {
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct WireTaxedMoney {
    pub net: WireMoney,
}

#[derive(Debug, Deserialize)]
pub struct WirePriceRange {
    #[serde(default)]
    pub start: Option<WireTaxedMoney>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePricing {
    #[serde(default)]
    pub on_sale: Option<bool>,
    #[serde(default)]
    pub price_range: Option<WirePriceRange>,
}

#[derive(Debug, Deserialize)]
pub struct WireProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<WireImage>,
    #[serde(default)]
    pub pricing: Option<WirePricing>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProductConnection {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub edges: Vec<WireEdge<WireProduct>>,
    #[serde(default)]
    pub page_info: Option<WirePageInfo>,
}

impl From<WireCategory> for CategoryDetails {
    fn from(category: WireCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            seo_title: category.seo_title.filter(|s| !s.is_empty()),
            seo_description: category.seo_description.filter(|s| !s.is_empty()),
            background_image_url: category.background_image.map(|i| i.url),
            ancestors: category
                .ancestors
                .unwrap_or_default()
                .edges
                .into_iter()
                .map(|e| CategoryAncestor { id: e.node.id, name: e.node.name })
                .collect(),
        }
    }
}

impl From<WireAttribute> for FilterableAttribute {
    fn from(attribute: WireAttribute) -> Self {
        Self {
            id: attribute.id,
            name: attribute.name,
            slug: attribute.slug,
            values: attribute
                .values
                .into_iter()
                .flatten()
                .map(|v| AttributeValue { id: v.id, name: v.name, slug: v.slug })
                .collect(),
        }
    }
}

impl From<WireProduct> for ProductNode {
    fn from(product: WireProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            thumbnail: product.thumbnail.map(|i| ProductThumbnail { url: i.url, alt: i.alt }),
            pricing: product.pricing.map(|p| ProductPricing {
                start_net: p
                    .price_range
                    .and_then(|r| r.start)
                    .map(|s| Money { amount: s.net.amount, currency: s.net.currency }),
                on_sale: p.on_sale.unwrap_or(false),
            }),
        }
    }
}

impl From<WireProductConnection> for ProductConnection {
    /// Edges without a cursor are given their node id as cursor. A missing
    /// total count falls back to the number of edges.
    fn from(connection: WireProductConnection) -> Self {
        let edges = connection
            .edges
            .into_iter()
            .map(|edge| {
                let node = ProductNode::from(edge.node);
                ProductEdge { cursor: edge.cursor.unwrap_or_else(|| node.id.clone()), node }
            })
            .collect::<Vec<_>>();
        let page_info = connection
            .page_info
            .map(|p| PageInfo { end_cursor: p.end_cursor, has_next_page: p.has_next_page })
            .unwrap_or_default();
        Self { total_count: connection.total_count.unwrap_or(edges.len() as u64), edges, page_info }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_priced_products() {
        let wire: WireProductConnection = serde_json::from_value(json!({
            "totalCount": 41,
            "edges": [{
                "cursor": "c1",
                "node": {
                    "id": "UHJvZHVjdDox",
                    "name": "Runner",
                    "pricing": {
                        "onSale": true,
                        "priceRange": {"start": {"net": {"amount": 49.5, "currency": "USD"}}}
                    }
                }
            }],
            "pageInfo": {"endCursor": "c1", "hasNextPage": true}
        }))
        .unwrap();
        let connection = ProductConnection::from(wire);
        assert_eq!(connection.total_count, 41);
        assert_eq!(connection.page_info, PageInfo { end_cursor: Some("c1".to_string()), has_next_page: true });
        let pricing = connection.edges[0].node.pricing.clone().unwrap();
        assert!(pricing.on_sale);
        assert_eq!(pricing.start_net, Some(Money { amount: 49.5, currency: "USD".to_string() }));
    }

    #[test]
    fn tolerates_sparse_products() {
        let wire: WireProductConnection = serde_json::from_value(json!({
            "edges": [{"node": {"id": "p1", "name": "Bare"}}]
        }))
        .unwrap();
        let connection = ProductConnection::from(wire);
        assert_eq!(connection.total_count, 1);
        assert_eq!(connection.edges[0].cursor, "p1");
        assert_eq!(connection.edges[0].node.pricing, None);
        assert_eq!(connection.page_info, PageInfo::default());
    }

    #[test]
    fn converts_category_with_ancestors() {
        let wire: WireCategory = serde_json::from_value(json!({
            "id": "Q2F0ZWdvcnk6Mw==",
            "name": "Sneakers",
            "seoTitle": "",
            "seoDescription": "All sneakers",
            "backgroundImage": {"url": "https://cdn.example/bg.png"},
            "ancestors": {"edges": [{"node": {"id": "Q2F0ZWdvcnk6MQ==", "name": "Shoes"}}]}
        }))
        .unwrap();
        let category = CategoryDetails::from(wire);
        assert_eq!(category.seo_title, None);
        assert_eq!(category.seo_description.as_deref(), Some("All sneakers"));
        assert_eq!(category.ancestors.len(), 1);
        assert_eq!(category.breadcrumbs().last().unwrap().name, "Sneakers");
    }

    #[test]
    fn drops_null_attribute_values() {
        let wire: WireAttribute = serde_json::from_value(json!({
            "id": "a1", "name": "Color", "slug": "color",
            "values": [{"id": "v1", "name": "Red", "slug": "red"}, null]
        }))
        .unwrap();
        assert_eq!(FilterableAttribute::from(wire).values.len(), 1);
    }
}
