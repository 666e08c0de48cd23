//! Priced product page for a category listing.

use common::listing::PricingPayload;
use common::catalog_error::CatalogError;
use common::listing_query::{FetchPolicy, ListingQueryVariables};
use serde::Deserialize;

use crate::api::listing::listing_wire::WireProductConnection;
use crate::catalog_utils::catalog_client::CatalogClient;

pub const PRODUCT_PRICES_OPERATION: &str = "ProductPrices";

pub const PRODUCT_PRICES_QUERY: &str = "
    query ProductPrices(
        $id: ID!
        $attributes: [AttributeInput]
        $after: String
        $pageSize: Int
        $sortBy: ProductOrder
        $priceLte: Float
        $priceGte: Float
    ) {
        products(
            after: $after
            first: $pageSize
            sortBy: $sortBy
            filter: {
                attributes: $attributes
                categories: [$id]
                minimalPrice: { gte: $priceGte, lte: $priceLte }
            }
        ) {
            totalCount
            edges {
                cursor
                node {
                    id
                    name
                    pricing {
                        onSale
                        priceRange {
                            start {
                                net {
                                    amount
                                    currency
                                }
                            }
                        }
                    }
                }
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
    }
";

#[derive(Debug, Deserialize)]
struct ProductPricesResponse {
    products: Option<WireProductConnection>,
}

pub async fn fetch_product_prices(
    client: &CatalogClient,
    variables: &ListingQueryVariables,
    policy: FetchPolicy,
) -> Result<PricingPayload, CatalogError> {
    let response = client
        .post_graphql::<_, ProductPricesResponse>(PRODUCT_PRICES_OPERATION, PRODUCT_PRICES_QUERY, variables, policy)
        .await?;
    let Some(products) = response.products else {
        return Err(CatalogError::MissingData(PRODUCT_PRICES_OPERATION.to_string()));
    };
    Ok(PricingPayload { products: products.into() })
}
