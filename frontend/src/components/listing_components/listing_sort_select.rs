use common::sort::SORT_OPTIONS;
use dioxus::prelude::*;

use crate::pages::category_page::ListingPageState;

#[component]
pub fn ListingSortSelect(current: String) -> Element {
    let state = use_context::<ListingPageState>();
    rsx! {
        select {
            style: "font-size: 16px; padding: 4px;",
            onchange: move |e: Event<FormData>| state.set_sort.call(e.value()),
            for option in SORT_OPTIONS.iter() {
                option {
                    key: "{option.label}",
                    value: option.value.unwrap_or_default(),
                    selected: option.value.unwrap_or_default() == current,
                    "{option.label}"
                }
            }
        }
    }
}
