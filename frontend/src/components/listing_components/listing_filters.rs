//! Attribute value checkboxes plus chips for the filters in effect.

use common::{
    filter_set::FilterSet,
    listing::{ActiveFilterLabel, AttributeValue, FilterableAttribute},
};
use dioxus::prelude::*;

use crate::pages::category_page::ListingPageState;

#[component]
pub fn ListingFilters(
    attributes: Vec<FilterableAttribute>,
    filters: FilterSet,
    active_filters: Vec<ActiveFilterLabel>,
) -> Element {
    let state = use_context::<ListingPageState>();
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 10px;
                min-width: 220px;
                max-width: 260px;
            ",
            if !active_filters.is_empty() {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 4px;",
                    for label in active_filters.iter().cloned() {
                        ActiveFilterChip {
                            key: "{label.attribute_slug}_{label.value_slug}",
                            label,
                        }
                    }
                    button {
                        style: "color:blue; border: 1px solid blue; padding: 2px 6px; border-radius: 5px;",
                        onclick: move |_| state.clear_filters.call(()),
                        "Clear all"
                    }
                }
            }
            for attribute in attributes.iter() {
                fieldset {
                    key: "{attribute.id}",
                    style: "border: 1px solid rgb(200, 205, 215); border-radius: 5px; padding: 6px;",
                    legend { "{attribute.name}" }
                    for value in attribute.values.iter().cloned() {
                        FilterValueCheckbox {
                            key: "{value.id}",
                            attribute_slug: attribute.slug.clone(),
                            checked: filters.is_selected(&attribute.slug, &value.slug),
                            value,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterValueCheckbox(attribute_slug: String, value: AttributeValue, checked: bool) -> Element {
    let state = use_context::<ListingPageState>();
    let input_id = format!("filter-{}-{}", attribute_slug, value.slug);
    rsx! {
        div {
            input {
                r#type: "checkbox",
                id: "{input_id}",
                checked,
                onchange: move |_| state.toggle_attribute_value.call((attribute_slug.clone(), value.slug.clone())),
            }
            label { r#for: "{input_id}", "{value.name}" }
        }
    }
}

#[component]
fn ActiveFilterChip(label: ActiveFilterLabel) -> Element {
    let state = use_context::<ListingPageState>();
    let ActiveFilterLabel { attribute_slug, value_slug, value_name } = label;
    rsx! {
        span {
            style: "background: rgb(230, 235, 245); border-radius: 12px; padding: 2px 8px; cursor: pointer;",
            title: "Remove filter",
            onclick: move |_| state.toggle_attribute_value.call((attribute_slug.clone(), value_slug.clone())),
            "{value_name} ✕"
        }
    }
}
