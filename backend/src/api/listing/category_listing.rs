//! Category metadata query: category, breadcrumb ancestors, filterable
//! attributes and the product page with thumbnails and cursors.

use common::listing::{CategoryPayload, ProductConnection};
use common::listing_const::{ATTRIBUTES_PAGE_SIZE, BREADCRUMB_ANCESTORS};
use common::catalog_error::CatalogError;
use common::listing_query::{FetchPolicy, ListingQueryVariables};
use serde::Deserialize;

use crate::api::listing::listing_wire::{WireAttribute, WireCategory, WireConnection, WireProductConnection};
use crate::catalog_utils::catalog_client::CatalogClient;

pub const CATEGORY_LISTING_OPERATION: &str = "CategoryListing";

pub fn category_listing_query() -> String {
    format!(
        "
    query CategoryListing(
        $id: ID!
        $attributes: [AttributeInput]
        $after: String
        $pageSize: Int
        $sortBy: ProductOrder
        $priceLte: Float
        $priceGte: Float
    ) {{
        category(id: $id) {{
            id
            name
            seoTitle
            seoDescription
            backgroundImage {{
                url
            }}
            ancestors(last: {BREADCRUMB_ANCESTORS}) {{
                edges {{
                    node {{
                        id
                        name
                    }}
                }}
            }}
        }}
        attributes(
            filter: {{ inCategory: $id, filterableInStorefront: true }}
            first: {ATTRIBUTES_PAGE_SIZE}
        ) {{
            edges {{
                node {{
                    id
                    name
                    slug
                    values {{
                        id
                        name
                        slug
                    }}
                }}
            }}
        }}
        products(
            after: $after
            first: $pageSize
            sortBy: $sortBy
            filter: {{
                attributes: $attributes
                categories: [$id]
                minimalPrice: {{ gte: $priceGte, lte: $priceLte }}
            }}
        ) {{
            totalCount
            edges {{
                cursor
                node {{
                    id
                    name
                    thumbnail {{
                        url
                        alt
                    }}
                }}
            }}
            pageInfo {{
                endCursor
                hasNextPage
            }}
        }}
    }}
    "
    )
}

#[derive(Debug, Deserialize)]
struct CategoryListingResponse {
    category: Option<WireCategory>,
    #[serde(default)]
    attributes: Option<WireConnection<WireAttribute>>,
    #[serde(default)]
    products: Option<WireProductConnection>,
}

impl From<CategoryListingResponse> for CategoryPayload {
    fn from(response: CategoryListingResponse) -> Self {
        Self {
            category: response.category.map(Into::into),
            attributes: response
                .attributes
                .unwrap_or_default()
                .edges
                .into_iter()
                .map(|e| e.node.into())
                .collect(),
            products: response.products.map(ProductConnection::from).unwrap_or_default(),
        }
    }
}

pub async fn fetch_category_listing(
    client: &CatalogClient,
    variables: &ListingQueryVariables,
    policy: FetchPolicy,
) -> Result<CategoryPayload, CatalogError> {
    let response = client
        .post_graphql::<_, CategoryListingResponse>(
            CATEGORY_LISTING_OPERATION,
            &category_listing_query(),
            variables,
            policy,
        )
        .await?;
    Ok(response.into())
}
