//! State and fetch orchestration behind a category page.
//!
//! Filters and sort live in [`ListingUrlState`], owned by the router; every
//! new URL state starts a fetch generation that runs the category query and
//! the pricing query concurrently. A generation only commits once both
//! completed, and only if no newer generation was started in the meantime
//! and the controller was not torn down.

use common::{
    catalog_error::CatalogError,
    listing::{CategoryPayload, PricingPayload, active_filter_labels},
    listing_query::{FetchPolicy, ListingQueryVariables},
    sort::normalize_sort,
    url_state::ListingUrlState,
};
use dioxus::logger::tracing;
use futures_util::future::join;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::catalog_source::CatalogSource;
use crate::data_definitions::listing_view::{ListingSnapshot, ListingView};
use crate::pages::category_page::listing_merge::{append_page, merge_listing, merge_products};

/// How a handler's fetch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The result was committed; `changed` is false when it equals the
    /// previously committed view.
    Committed { changed: bool },
    /// A newer generation started while this fetch was in flight.
    Stale,
    /// The controller was torn down.
    Cancelled,
    /// Nothing to do (URL unchanged, no next page, or a page is already
    /// loading).
    Skipped,
    /// A follow-up page failed; the current result is kept.
    Failed(CatalogError),
}

#[derive(Debug, Default)]
struct ControllerState {
    url_state: ListingUrlState,
    generation: u64,
    /// Generation whose fetch has not committed yet.
    in_flight: Option<u64>,
    committed: ListingView,
    loading_more: bool,
    revision: u64,
}

pub struct ListingController<S> {
    source: S,
    category_id: String,
    state: Mutex<ControllerState>,
    cancel: CancellationToken,
}

impl<S: CatalogSource> ListingController<S> {
    pub fn new(source: S, category_id: impl Into<String>, url_state: ListingUrlState) -> Self {
        Self {
            source,
            category_id: category_id.into(),
            state: Mutex::new(ControllerState { url_state, ..Default::default() }),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock().await;
        let view = match state.in_flight {
            Some(_) => ListingView::Loading,
            None => state.committed.clone(),
        };
        let attributes = view.result().map(|r| r.attributes.as_slice()).unwrap_or_default();
        ListingSnapshot {
            active_filters: active_filter_labels(&state.url_state.filters, attributes),
            can_load_more: view.result().is_some_and(|r| r.can_load_more()) && !state.loading_more,
            view,
            revision: state.revision,
            generation: state.generation,
            url_query: state.url_state.to_query(),
            sort: state.url_state.sort_spec(),
            active_filter_count: state.url_state.filters.active_filter_count(),
            url_state: state.url_state.clone(),
            loading_more: state.loading_more,
        }
    }

    /// Adopt the URL state the page is showing and fetch its first page.
    ///
    /// Filter toggles, clearing and sort changes all arrive here as one new
    /// URL state, so each navigation costs a single pair of queries. A state
    /// equal to the committed one is skipped; a state whose fetch is still
    /// in flight is fetched again, since the previous caller may have been
    /// dropped.
    pub async fn follow_url(&self, url_state: ListingUrlState) -> FetchOutcome {
        {
            let mut state = self.state.lock().await;
            if state.url_state == url_state && state.in_flight.is_none() && state.committed != ListingView::Loading {
                return FetchOutcome::Skipped;
            }
            if let Some(token) = url_state.sort_by.as_deref() {
                if let Err(err) = normalize_sort(token) {
                    tracing::debug!(%err, "using default sort");
                }
            }
            tracing::debug!(filters = %url_state.filters, sort_by = ?url_state.sort_by, "following url");
            state.url_state = url_state;
        }
        self.reload(FetchPolicy::CacheFirst).await
    }

    /// Start over from the first page, bypassing cached responses.
    pub async fn refresh(&self) -> FetchOutcome {
        self.reload(FetchPolicy::NetworkOnly).await
    }

    /// Fetch the page after the current end cursor and append it.
    pub async fn load_more(&self) -> FetchOutcome {
        let (generation, variables) = {
            let mut state = self.state.lock().await;
            if self.cancel.is_cancelled() {
                return FetchOutcome::Cancelled;
            }
            if state.in_flight.is_some() || state.loading_more {
                return FetchOutcome::Skipped;
            }
            let Some(result) = state.committed.result() else {
                return FetchOutcome::Skipped;
            };
            let Some(cursor) = result
                .products
                .page_info
                .end_cursor
                .clone()
                .filter(|_| result.products.page_info.has_next_page)
            else {
                return FetchOutcome::Skipped;
            };
            state.loading_more = true;
            (state.generation, self.variables_for(&state.url_state).with_after(cursor))
        };
        tracing::debug!(generation, after = ?variables.after, "loading next page");

        let Some((category, pricing)) = self.fetch_both(&variables, FetchPolicy::CacheFirst).await else {
            return FetchOutcome::Cancelled;
        };

        let mut state = self.state.lock().await;
        if self.cancel.is_cancelled() {
            return FetchOutcome::Cancelled;
        }
        if state.generation != generation {
            tracing::debug!(generation, current = state.generation, "dropping stale page");
            return FetchOutcome::Stale;
        }
        state.loading_more = false;

        let page = match (category, pricing) {
            (Ok(category), Ok(pricing)) => merge_products(category.products, pricing.products),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(%err, "failed to load next page");
                return FetchOutcome::Failed(err);
            }
        };
        let ListingView::Ready(result) = &mut state.committed else {
            return FetchOutcome::Skipped;
        };
        let appended = page.edges.len();
        append_page(&mut result.products, page);
        state.revision += 1;
        tracing::debug!(generation, appended, "appended page");
        FetchOutcome::Committed { changed: true }
    }

    /// Stop committing results. Fetches still in flight resolve to
    /// [`FetchOutcome::Cancelled`].
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    fn variables_for(&self, url_state: &ListingUrlState) -> ListingQueryVariables {
        ListingQueryVariables::new(&self.category_id, &url_state.filters, url_state.sort_spec())
    }

    async fn reload(&self, policy: FetchPolicy) -> FetchOutcome {
        let (generation, variables) = {
            let mut state = self.state.lock().await;
            if self.cancel.is_cancelled() {
                return FetchOutcome::Cancelled;
            }
            let generation = state.generation + 1;
            state.generation = generation;
            state.in_flight = Some(generation);
            state.loading_more = false;
            (generation, self.variables_for(&state.url_state))
        };
        tracing::debug!(generation, category = %self.category_id, ?policy, "fetching listing");

        let Some((category, pricing)) = self.fetch_both(&variables, policy).await else {
            return FetchOutcome::Cancelled;
        };

        let mut state = self.state.lock().await;
        if self.cancel.is_cancelled() {
            return FetchOutcome::Cancelled;
        }
        if state.generation != generation {
            tracing::debug!(generation, current = state.generation, "dropping stale listing");
            return FetchOutcome::Stale;
        }
        let view = resolve_view(category, pricing);
        state.in_flight = None;
        let changed = view != state.committed;
        if changed {
            state.committed = view;
            state.revision += 1;
        }
        FetchOutcome::Committed { changed }
    }

    /// Run both queries concurrently. `None` when torn down first.
    async fn fetch_both(
        &self,
        variables: &ListingQueryVariables,
        policy: FetchPolicy,
    ) -> Option<(Result<CategoryPayload, CatalogError>, Result<PricingPayload, CatalogError>)> {
        let token = self.cancel.child_token();
        let fetches = join(
            self.source.fetch_category(variables, policy),
            self.source.fetch_pricing(variables, policy),
        );
        tokio::select! {
            _ = token.cancelled() => None,
            results = fetches => Some(results),
        }
    }
}

impl<S> Drop for ListingController<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// A missing category wins over any failure; a network failure on either
/// query reads as offline, even when the other query failed differently.
fn resolve_view(
    category: Result<CategoryPayload, CatalogError>,
    pricing: Result<PricingPayload, CatalogError>,
) -> ListingView {
    if category.as_ref().is_ok_and(|payload| payload.category.is_none()) {
        return ListingView::NotFound;
    }
    let offline = [category.as_ref().err(), pricing.as_ref().err()]
        .into_iter()
        .flatten()
        .find(|err| err.is_network_unavailable());
    if let Some(err) = offline {
        tracing::warn!(%err, "catalog offline");
        return ListingView::Offline;
    }
    match (category, pricing) {
        (Ok(category), Ok(pricing)) => match merge_listing(category, pricing) {
            Some(result) => ListingView::Ready(result),
            None => ListingView::NotFound,
        },
        (Err(err), _) | (_, Err(err)) => {
            tracing::error!(%err, "catalog query failed");
            ListingView::Error(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use common::listing::{
        CategoryDetails, FilterableAttribute, AttributeValue, Money, PageInfo, ProductConnection,
        ProductEdge, ProductNode, ProductPricing,
    };
    use common::sort::{OrderDirection, SortField, SortSpec};

    use super::*;

    const PAGE: usize = 2;

    #[derive(Clone)]
    struct Product {
        id: &'static str,
        name: &'static str,
        color: &'static str,
        price: f64,
    }

    type DelayFn = Box<dyn Fn(&ListingQueryVariables) -> Duration + Send + Sync>;

    /// In-memory catalog paging by index cursors and filtering on `color`.
    struct FakeCatalog {
        products: Vec<Product>,
        category_exists: bool,
        category_error: Option<CatalogError>,
        pricing_error: Option<CatalogError>,
        delay: DelayFn,
        calls: StdMutex<Vec<(ListingQueryVariables, FetchPolicy)>>,
    }

    impl FakeCatalog {
        fn new() -> Self {
            Self {
                products: vec![
                    Product { id: "p1", name: "Red runner", color: "red", price: 10.0 },
                    Product { id: "p2", name: "Blue runner", color: "blue", price: 20.0 },
                    Product { id: "p3", name: "Red boot", color: "red", price: 30.0 },
                    Product { id: "p4", name: "Green boot", color: "green", price: 40.0 },
                    Product { id: "p5", name: "Red sandal", color: "red", price: 50.0 },
                ],
                category_exists: true,
                category_error: None,
                pricing_error: None,
                delay: Box::new(|_| Duration::ZERO),
                calls: StdMutex::new(Vec::new()),
            }
        }

        fn page(&self, variables: &ListingQueryVariables, priced: bool) -> ProductConnection {
            let colors = variables
                .attributes
                .iter()
                .filter(|a| a.slug == "color")
                .flat_map(|a| a.values.iter().map(String::as_str))
                .collect::<Vec<_>>();
            let matching = self
                .products
                .iter()
                .filter(|p| colors.is_empty() || colors.contains(&p.color))
                .collect::<Vec<_>>();
            let start = variables.after.as_deref().and_then(|c| c.parse::<usize>().ok()).map_or(0, |i| i + 1);
            let edges = matching
                .iter()
                .enumerate()
                .skip(start)
                .take(PAGE)
                .map(|(index, p)| ProductEdge {
                    cursor: index.to_string(),
                    node: ProductNode {
                        id: p.id.to_string(),
                        name: p.name.to_string(),
                        thumbnail: None,
                        pricing: priced.then(|| ProductPricing {
                            start_net: Some(Money { amount: p.price, currency: "USD".to_string() }),
                            on_sale: false,
                        }),
                    },
                })
                .collect::<Vec<_>>();
            let end = start + edges.len();
            ProductConnection {
                total_count: matching.len() as u64,
                page_info: PageInfo {
                    end_cursor: edges.last().map(|e| e.cursor.clone()),
                    has_next_page: end < matching.len(),
                },
                edges,
            }
        }
    }

    impl CatalogSource for FakeCatalog {
        async fn fetch_category(
            &self,
            variables: &ListingQueryVariables,
            policy: FetchPolicy,
        ) -> Result<CategoryPayload, CatalogError> {
            self.calls.lock().unwrap().push((variables.clone(), policy));
            tokio::time::sleep((self.delay)(variables)).await;
            if let Some(err) = &self.category_error {
                return Err(err.clone());
            }
            Ok(CategoryPayload {
                category: self.category_exists.then(|| CategoryDetails {
                    id: variables.id.clone(),
                    name: "Shoes".to_string(),
                    seo_title: None,
                    seo_description: None,
                    background_image_url: None,
                    ancestors: vec![],
                }),
                attributes: vec![FilterableAttribute {
                    id: "a1".to_string(),
                    name: "Color".to_string(),
                    slug: "color".to_string(),
                    values: vec![AttributeValue { id: "v1".to_string(), name: "Crimson".to_string(), slug: "red".to_string() }],
                }],
                products: self.page(variables, false),
            })
        }

        async fn fetch_pricing(
            &self,
            variables: &ListingQueryVariables,
            _policy: FetchPolicy,
        ) -> Result<PricingPayload, CatalogError> {
            tokio::time::sleep((self.delay)(variables)).await;
            if let Some(err) = &self.pricing_error {
                return Err(err.clone());
            }
            Ok(PricingPayload { products: self.page(variables, true) })
        }
    }

    fn product_ids(snapshot: &ListingSnapshot) -> Vec<String> {
        snapshot
            .view
            .result()
            .map(|r| r.products.edges.iter().map(|e| e.node.id.clone()).collect())
            .unwrap_or_default()
    }

    fn url(query: &str) -> ListingUrlState {
        ListingUrlState::from_query(query)
    }

    fn controller(catalog: FakeCatalog) -> ListingController<FakeCatalog> {
        ListingController::new(catalog, "12", ListingUrlState::default())
    }

    async fn loaded(catalog: FakeCatalog, query: &str) -> ListingController<FakeCatalog> {
        let controller = ListingController::new(catalog, "12", url(query));
        controller.follow_url(url(query)).await;
        controller
    }

    #[tokio::test]
    async fn loads_and_merges_first_page() {
        let controller = controller(FakeCatalog::new());
        assert_eq!(controller.snapshot().await.view, ListingView::Loading);

        assert_eq!(controller.follow_url(ListingUrlState::default()).await, FetchOutcome::Committed { changed: true });
        let snapshot = controller.snapshot().await;
        assert_eq!(product_ids(&snapshot), vec!["p1", "p2"]);
        let result = snapshot.view.result().unwrap();
        assert_eq!(result.category.id, "Q2F0ZWdvcnk6MTI=");
        assert_eq!(result.products.total_count, 5);
        assert!(result.products.edges.iter().all(|e| e.node.pricing.is_some()));
        assert!(snapshot.can_load_more);
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.sort, SortSpec::default());
    }

    #[tokio::test]
    async fn combined_url_change_fetches_once() {
        let controller = loaded(FakeCatalog::new(), "filters=color_green").await;
        let next = url("filters=color_green")
            .without_filters()
            .with_toggled_filter("color", "red")
            .with_sort(Some("-price"));

        assert_eq!(controller.follow_url(next.clone()).await, FetchOutcome::Committed { changed: true });
        assert_eq!(controller.follow_url(next).await, FetchOutcome::Skipped);

        let calls = controller.source.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0.attributes.len(), 1);
        assert_eq!(calls[1].0.sort_by, SortSpec { field: SortField::Price, direction: OrderDirection::Desc });
        drop(calls);
        assert_eq!(controller.snapshot().await.url_query, "sortBy=-price&filters=color_red");
    }

    #[tokio::test]
    async fn identical_reload_does_not_bump_revision() {
        let controller = loaded(FakeCatalog::new(), "").await;
        assert_eq!(controller.refresh().await, FetchOutcome::Committed { changed: false });
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.generation, 2);
        let calls = controller.source.calls.lock().unwrap();
        assert_eq!(calls[1].1, FetchPolicy::NetworkOnly);
        assert_eq!(calls[1].0.after, None);
    }

    #[tokio::test]
    async fn load_more_appends_until_last_page() {
        let controller = loaded(FakeCatalog::new(), "").await;
        assert_eq!(controller.load_more().await, FetchOutcome::Committed { changed: true });
        assert_eq!(controller.load_more().await, FetchOutcome::Committed { changed: true });
        let snapshot = controller.snapshot().await;
        assert_eq!(product_ids(&snapshot), vec!["p1", "p2", "p3", "p4", "p5"]);
        assert!(!snapshot.can_load_more);

        let before = snapshot.view.result().unwrap().products.clone();
        assert_eq!(controller.load_more().await, FetchOutcome::Skipped);
        let after = controller.snapshot().await;
        assert_eq!(after.view.result().unwrap().products, before);
        assert_eq!(after.revision, snapshot.revision);

        let calls = controller.source.calls.lock().unwrap();
        let afters = calls.iter().map(|(v, _)| v.after.clone()).collect::<Vec<_>>();
        assert_eq!(afters, vec![None, Some("1".to_string()), Some("3".to_string())]);
    }

    #[tokio::test]
    async fn load_more_before_load_is_skipped() {
        let controller = controller(FakeCatalog::new());
        assert_eq!(controller.load_more().await, FetchOutcome::Skipped);
        assert!(controller.source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggling_filters_updates_url_and_refetches() {
        let controller = loaded(FakeCatalog::new(), "?filters=color_red_blue").await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.view.result().unwrap().products.total_count, 4);

        controller.follow_url(snapshot.url_state.with_toggled_filter("color", "blue")).await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.url_query, "filters=color_red");
        assert_eq!(product_ids(&snapshot), vec!["p1", "p3"]);
        assert_eq!(snapshot.active_filter_count, 1);
        assert_eq!(snapshot.active_filters[0].value_name, "Crimson");

        controller.follow_url(snapshot.url_state.with_toggled_filter("color", "red")).await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.url_query, "");
        assert_eq!(snapshot.active_filter_count, 0);
        assert_eq!(snapshot.view.result().unwrap().products.total_count, 5);
    }

    #[tokio::test]
    async fn clear_filters_resets_to_unfiltered() {
        let controller = loaded(FakeCatalog::new(), "filters=color_green&sortBy=name").await;
        let cleared = controller.snapshot().await.url_state.without_filters();
        controller.follow_url(cleared).await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.url_query, "sortBy=name");
        assert_eq!(snapshot.view.result().unwrap().products.total_count, 5);
    }

    #[tokio::test]
    async fn sort_changes_reach_the_query() {
        let controller = controller(FakeCatalog::new());
        controller.follow_url(url("sortBy=-price")).await;
        assert_eq!(
            controller.snapshot().await.sort,
            SortSpec { field: SortField::Price, direction: OrderDirection::Desc }
        );

        assert!(matches!(controller.follow_url(url("sortBy=bogus")).await, FetchOutcome::Committed { .. }));
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.sort, SortSpec::default());
        assert!(matches!(snapshot.view, ListingView::Ready(_)));

        controller.follow_url(snapshot.url_state.with_sort(None)).await;
        assert_eq!(controller.snapshot().await.url_query, "");

        let calls = controller.source.calls.lock().unwrap();
        let sorts = calls.iter().map(|(v, _)| v.sort_by).collect::<Vec<_>>();
        assert_eq!(sorts[0], SortSpec { field: SortField::Price, direction: OrderDirection::Desc });
        assert_eq!(sorts[1], SortSpec::default());
    }

    #[tokio::test]
    async fn missing_category_is_not_found_even_if_pricing_fails() {
        let mut catalog = FakeCatalog::new();
        catalog.category_exists = false;
        catalog.pricing_error = Some(CatalogError::NetworkUnavailable("down".to_string()));
        let controller = loaded(catalog, "").await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.view, ListingView::NotFound);
        assert!(!snapshot.can_load_more);
    }

    #[tokio::test]
    async fn category_network_failure_is_offline() {
        let mut catalog = FakeCatalog::new();
        catalog.category_error = Some(CatalogError::NetworkUnavailable("connection refused".to_string()));
        let controller = loaded(catalog, "").await;
        assert_eq!(controller.snapshot().await.view, ListingView::Offline);
    }

    #[tokio::test]
    async fn pricing_network_failure_is_offline() {
        let mut catalog = FakeCatalog::new();
        catalog.pricing_error = Some(CatalogError::NetworkUnavailable("timed out".to_string()));
        let controller = loaded(catalog, "").await;
        assert_eq!(controller.snapshot().await.view, ListingView::Offline);
    }

    #[tokio::test]
    async fn network_failure_wins_over_a_query_error() {
        let mut catalog = FakeCatalog::new();
        catalog.category_error = Some(CatalogError::GraphQl(vec!["boom".to_string()]));
        catalog.pricing_error = Some(CatalogError::NetworkUnavailable("connection reset".to_string()));
        let controller = loaded(catalog, "").await;
        assert_eq!(controller.snapshot().await.view, ListingView::Offline);

        let mut catalog = FakeCatalog::new();
        catalog.category_error = Some(CatalogError::NetworkUnavailable("connection reset".to_string()));
        catalog.pricing_error = Some(CatalogError::GraphQl(vec!["boom".to_string()]));
        let controller = loaded(catalog, "").await;
        assert_eq!(controller.snapshot().await.view, ListingView::Offline);
    }

    #[tokio::test]
    async fn query_errors_are_errors() {
        let mut catalog = FakeCatalog::new();
        catalog.pricing_error = Some(CatalogError::GraphQl(vec!["boom".to_string()]));
        let controller = loaded(catalog, "").await;
        let view = controller.snapshot().await.view;
        assert!(matches!(view, ListingView::Error(ref message) if message.contains("boom")));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_is_discarded() {
        let mut catalog = FakeCatalog::new();
        // the unfiltered listing answers slowly, the filtered one quickly
        catalog.delay = Box::new(|v| {
            if v.attributes.is_empty() { Duration::from_millis(100) } else { Duration::from_millis(10) }
        });
        let controller = controller(catalog);

        let (first, second) = tokio::join!(controller.follow_url(ListingUrlState::default()), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            let loading = controller.snapshot().await;
            assert_eq!(loading.view, ListingView::Loading);
            controller.follow_url(loading.url_state.with_toggled_filter("color", "green")).await
        });

        assert_eq!(first, FetchOutcome::Stale);
        assert_eq!(second, FetchOutcome::Committed { changed: true });
        let snapshot = controller.snapshot().await;
        assert_eq!(product_ids(&snapshot), vec!["p4"]);
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.revision, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_fetch_does_not_block_the_same_url() {
        let mut catalog = FakeCatalog::new();
        catalog.delay = Box::new(|_| Duration::from_millis(100));
        let controller = controller(catalog);

        let abandoned = tokio::time::timeout(Duration::from_millis(10), controller.follow_url(ListingUrlState::default())).await;
        assert!(abandoned.is_err());
        assert_eq!(controller.snapshot().await.view, ListingView::Loading);

        assert_eq!(controller.follow_url(ListingUrlState::default()).await, FetchOutcome::Committed { changed: true });
        assert_eq!(product_ids(&controller.snapshot().await), vec!["p1", "p2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn load_more_from_old_generation_is_discarded() {
        let mut catalog = FakeCatalog::new();
        catalog.delay = Box::new(|v| if v.after.is_some() { Duration::from_millis(50) } else { Duration::from_millis(5) });
        let controller = loaded(catalog, "").await;

        let (more, refreshed) = tokio::join!(controller.load_more(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            controller.refresh().await
        });
        assert_eq!(more, FetchOutcome::Stale);
        assert!(matches!(refreshed, FetchOutcome::Committed { .. }));
        let snapshot = controller.snapshot().await;
        assert_eq!(product_ids(&snapshot), vec!["p1", "p2"]);
        assert!(!snapshot.loading_more);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_commits() {
        let mut catalog = FakeCatalog::new();
        catalog.delay = Box::new(|_| Duration::from_millis(100));
        let controller = controller(catalog);

        let (outcome, _) = tokio::join!(controller.follow_url(ListingUrlState::default()), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            controller.teardown();
        });
        assert_eq!(outcome, FetchOutcome::Cancelled);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.revision, 0);
        assert_eq!(controller.refresh().await, FetchOutcome::Cancelled);
        assert_eq!(controller.load_more().await, FetchOutcome::Cancelled);
        assert_eq!(controller.follow_url(url("sortBy=name")).await, FetchOutcome::Cancelled);
    }

    #[tokio::test]
    async fn failed_next_page_keeps_current_result() {
        let controller = loaded(FakeCatalog::new(), "").await;
        let mut broken = FakeCatalog::new();
        broken.pricing_error = Some(CatalogError::Http { status: 502, body: "bad gateway".to_string() });
        // swap in a failing catalog while keeping the committed state
        let controller = ListingController {
            source: broken,
            category_id: controller.category_id.clone(),
            state: Mutex::new(std::mem::take(&mut *controller.state.lock().await)),
            cancel: CancellationToken::new(),
        };
        assert!(matches!(controller.load_more().await, FetchOutcome::Failed(CatalogError::Http { status: 502, .. })));
        let snapshot = controller.snapshot().await;
        assert_eq!(product_ids(&snapshot), vec!["p1", "p2"]);
        assert!(snapshot.can_load_more);
    }
}
