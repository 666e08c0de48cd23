//! The category page body for whatever state the listing is in.

use common::{listing::ListingResult, sort::sort_option_label};
use dioxus::prelude::*;

use crate::{
    components::{
        error_boundary::ComponentErrorDisplay,
        listing_components::{
            listing_breadcrumbs::ListingBreadcrumbs, listing_filters::ListingFilters,
            listing_sort_select::ListingSortSelect, product_list::ProductList,
        },
        loading_indicator::LoadingIndicator,
    },
    data_definitions::listing_view::{ListingSnapshot, ListingView},
    pages::category_page::ListingPageState,
};

#[component]
pub fn CategoryListingView() -> Element {
    let state = use_context::<ListingPageState>();
    if state.listing.read().is_none() {
        return rsx! { LoadingIndicator {} };
    }
    let snapshot = state.snapshot.read();
    let Some(snapshot) = snapshot.as_ref() else {
        return rsx! { LoadingIndicator {} };
    };

    match &snapshot.view {
        ListingView::Loading => rsx! { LoadingIndicator {} },
        ListingView::NotFound => rsx! {
            document::Title { "Category not found" }
            ComponentErrorDisplay { title: "Category not found".to_string(), error_txt: String::new() }
        },
        ListingView::Offline => rsx! {
            ComponentErrorDisplay {
                title: "You are offline".to_string(),
                error_txt: "The catalog could not be reached. Check your connection and try again.".to_string(),
                button {
                    style: "color:blue; font-size: 26px; border: 1px solid blue; padding: 10px; border-radius: 5px; margin: 15px;",
                    onclick: move |_| state.refresh.call(()),
                    "Try Again"
                }
            }
        },
        ListingView::Error(message) => rsx! {
            ComponentErrorDisplay {
                title: "Component Error".to_string(),
                error_txt: message.clone(),
                button {
                    style: "color:blue; font-size: 26px; border: 1px solid blue; padding: 10px; border-radius: 5px; margin: 15px;",
                    onclick: move |_| state.refresh.call(()),
                    "Try Again"
                }
            }
        },
        ListingView::Ready(result) => render_ready(snapshot, result),
    }
}

fn render_ready(snapshot: &ListingSnapshot, result: &ListingResult) -> Element {
    let category = &result.category;
    let title = category.seo_title.clone().unwrap_or_else(|| category.name.clone());
    let sort_label = sort_option_label(snapshot.url_state.sort_by.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| snapshot.sort.token());

    rsx! {
        document::Title { "{title}" }
        div {
            id: "x-category-page-root",
            style: "
                display: flex;
                flex-direction: column;
                gap: 6px;
                padding: 7px;
                height: 100%;
                width: 100%;
            ",
            ListingBreadcrumbs { breadcrumbs: category.breadcrumbs() }
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 16px;
                    height: 56px;
                ",
                h1 {
                    style: "font-size: 20px; font-weight: 300; color:rgb(75, 87, 112); border-bottom: 1px solid rgb(75, 87, 112);",
                    "{category.name}: {result.products.total_count} products, sorted by {sort_label}"
                }
                div { style: "flex-grow: 1;" }
                ListingSortSelect { current: snapshot.url_state.sort_by.clone().unwrap_or_default() }
            }
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    gap: 12px;
                    flex-grow: 1;
                ",
                ListingFilters {
                    attributes: result.attributes.clone(),
                    filters: snapshot.url_state.filters.clone(),
                    active_filters: snapshot.active_filters.clone(),
                }
                ProductList {
                    products: result.products.clone(),
                    can_load_more: snapshot.can_load_more,
                    loading_more: snapshot.loading_more,
                }
            }
        }
    }
}
