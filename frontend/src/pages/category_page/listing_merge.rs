//! Merging the category payload with the pricing payload.
//!
//! Precedence: the category payload owns the category metadata and the
//! attribute list; the pricing payload owns the product list (order, names,
//! pricing), `pageInfo` and `totalCount`. Product nodes are matched by id so
//! fields only the category query asks for (thumbnails) survive the overlay.
//! Products missing from the pricing payload stay listed after the priced
//! ones, in their category order and without pricing.

use std::collections::HashMap;

use common::listing::{
    CategoryPayload, ListingResult, PricingPayload, ProductConnection, ProductEdge, ProductNode,
};

/// Merge both payloads of one page. `None` when the category does not exist.
pub fn merge_listing(category: CategoryPayload, pricing: PricingPayload) -> Option<ListingResult> {
    let details = category.category?;
    Some(ListingResult {
        category: details,
        attributes: category.attributes,
        products: merge_products(category.products, pricing.products),
    })
}

pub fn merge_products(base: ProductConnection, pricing: ProductConnection) -> ProductConnection {
    let mut leftovers = base.edges.into_iter().map(Some).collect::<Vec<_>>();
    let positions = leftovers
        .iter()
        .enumerate()
        .filter_map(|(position, edge)| edge.as_ref().map(|e| (e.node.id.clone(), position)))
        .collect::<HashMap<_, _>>();

    let mut edges = pricing
        .edges
        .into_iter()
        .map(|edge| {
            let base_edge = positions.get(&edge.node.id).and_then(|&position| leftovers[position].take());
            let node = match base_edge {
                Some(base_edge) => overlay_node(base_edge.node, edge.node),
                None => edge.node,
            };
            ProductEdge { cursor: edge.cursor, node }
        })
        .collect::<Vec<_>>();
    edges.extend(leftovers.into_iter().flatten());

    ProductConnection { total_count: pricing.total_count, edges, page_info: pricing.page_info }
}

fn overlay_node(base: ProductNode, priced: ProductNode) -> ProductNode {
    ProductNode {
        id: priced.id,
        name: priced.name,
        thumbnail: priced.thumbnail.or(base.thumbnail),
        pricing: priced.pricing.or(base.pricing),
    }
}

/// Append a follow-up page: existing edges first, then the new ones; the
/// new page's `pageInfo` and `totalCount` replace the old ones.
pub fn append_page(current: &mut ProductConnection, page: ProductConnection) {
    current.edges.extend(page.edges);
    current.page_info = page.page_info;
    current.total_count = page.total_count;
}
