use common::listing::{ProductConnection, ProductNode};
use dioxus::prelude::*;

use crate::{components::loading_indicator::LoadingIndicator, pages::category_page::ListingPageState};

const NAME_WIDTH: usize = 40;

#[component]
pub fn ProductList(products: ProductConnection, can_load_more: bool, loading_more: bool) -> Element {
    let state = use_context::<ListingPageState>();
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 8px;
                flex-grow: 1;
            ",
            if products.edges.is_empty() {
                p { style: "color: rgb(75, 87, 112);", "No products match these filters." }
            }
            div {
                style: "
                    display: grid;
                    grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
                    gap: 12px;
                ",
                for edge in products.edges.iter() {
                    ProductCard { key: "{edge.node.id}", product: edge.node.clone() }
                }
            }
            if loading_more {
                LoadingIndicator {}
            } else if can_load_more {
                button {
                    style: "color:blue; font-size: 18px; border: 1px solid blue; padding: 8px; border-radius: 5px; margin: 15px auto;",
                    onclick: move |_| state.load_more.call(()),
                    "Load more"
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: ProductNode) -> Element {
    let name = name_ellipsis(&product.name);
    let price = price_text(&product);
    rsx! {
        div {
            style: "border: 1px solid rgb(200, 205, 215); border-radius: 5px; padding: 8px;",
            title: "{product.name}",
            if let Some(thumbnail) = &product.thumbnail {
                img {
                    src: "{thumbnail.url}",
                    alt: thumbnail.alt.clone().unwrap_or_default(),
                    style: "width: 100%; aspect-ratio: 1; object-fit: cover;",
                }
            }
            div { style: "font-weight: 500;", "{name}" }
            div { style: "color: rgb(75, 87, 112);", "{price}" }
        }
    }
}

fn name_ellipsis(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        return name.to_string();
    }
    let truncated: String = name.chars().take(NAME_WIDTH - 3).collect();
    format!("{}...", truncated)
}

fn price_text(product: &ProductNode) -> String {
    let Some(pricing) = &product.pricing else {
        return "-".to_string();
    };
    let Some(start) = &pricing.start_net else {
        return "-".to_string();
    };
    let sale = if pricing.on_sale { " (sale)" } else { "" };
    format!("{:.2} {}{}", start.amount, start.currency, sale)
}
