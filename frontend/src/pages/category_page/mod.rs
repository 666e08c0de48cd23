//! Category page: filters and sort in the URL, the listing fetched and
//! merged by [`listing_controller::ListingController`].

pub mod listing_controller;
pub mod listing_merge;

use std::rc::Rc;

use common::url_state::ListingUrlState;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::{
    api::catalog_source::ServerCatalog,
    components::listing_components::category_listing_view::CategoryListingView,
    data_definitions::listing_view::ListingSnapshot,
    routes::Route,
};
use listing_controller::{FetchOutcome, ListingController};

/// Listing state and handlers shared with the listing components.
#[derive(Copy, Clone)]
pub struct ListingPageState {
    /// Outcome of the fetch for the current URL; `None` while it runs.
    pub listing: ReadSignal<Option<FetchOutcome>>,
    pub snapshot: ReadSignal<Option<ListingSnapshot>>,
    pub toggle_attribute_value: Callback<(String, String)>,
    pub clear_filters: Callback<()>,
    pub set_sort: Callback<String>,
    pub load_more: Callback<()>,
    pub refresh: Callback<()>,
}

#[component]
pub fn CategoryPage(slug: String, category_id: String, sortBy: String, filters: String) -> Element {
    let (url_state, rejects) = ListingUrlState::from_params(&sortBy, &filters);
    for reject in rejects {
        tracing::warn!(segment = %reject.segment, "dropping malformed filter segment");
    }

    rsx! {
        CategoryPageRoot {
            key: "{category_id}",
            slug,
            category_id: category_id.clone(),
            url_state,
        }
    }
}

#[component]
fn CategoryPageRoot(
    slug: ReadSignal<String>,
    category_id: ReadSignal<String>,
    url_state: ReadSignal<ListingUrlState>,
) -> Element {
    let controller = use_hook(|| {
        Rc::new(ListingController::new(ServerCatalog, category_id.peek().clone(), url_state.peek().clone()))
    });
    use_drop({
        let controller = controller.clone();
        move || controller.teardown()
    });

    let mut snapshot = use_signal(|| None::<ListingSnapshot>);

    let mut listing = use_resource({
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            let next = url_state.read().clone();
            async move {
                let outcome = controller.follow_url(next).await;
                if !matches!(outcome, FetchOutcome::Stale | FetchOutcome::Cancelled) {
                    snapshot.set(Some(controller.snapshot().await));
                }
                outcome
            }
        }
    });
    // when the url state changes, show the loading state until the new listing commits
    use_effect(move || {
        let _ = url_state.read();
        listing.clear();
        listing.restart();
    });

    let navigate = move |next: ListingUrlState| {
        navigator().push(Route::category_page(&slug.read(), &category_id.read(), &next));
    };
    let toggle_attribute_value = Callback::new(move |(attribute, value): (String, String)| {
        navigate(url_state.read().with_toggled_filter(&attribute, &value));
    });
    let clear_filters = Callback::new(move |_: ()| {
        navigate(url_state.read().without_filters());
    });
    let set_sort = Callback::new(move |token: String| {
        navigate(url_state.read().with_sort(Some(&token)));
    });

    let load_more = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            let controller = controller.clone();
            spawn(async move {
                if let Some(current) = &mut *snapshot.write() {
                    current.loading_more = true;
                    current.can_load_more = false;
                }
                let outcome = controller.load_more().await;
                if let FetchOutcome::Failed(err) = &outcome {
                    tracing::warn!(%err, "next page failed");
                }
                if !matches!(outcome, FetchOutcome::Stale | FetchOutcome::Cancelled) {
                    snapshot.set(Some(controller.snapshot().await));
                }
            });
        }
    });
    let refresh = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            let controller = controller.clone();
            spawn(async move {
                snapshot.set(None);
                let outcome = controller.refresh().await;
                if !matches!(outcome, FetchOutcome::Stale | FetchOutcome::Cancelled) {
                    snapshot.set(Some(controller.snapshot().await));
                }
            });
        }
    });

    use_context_provider(move || ListingPageState {
        listing: listing.into(),
        snapshot: snapshot.into(),
        toggle_attribute_value,
        clear_filters,
        set_sort,
        load_more,
        refresh,
    });

    rsx! {
        CategoryListingView {}
    }
}
