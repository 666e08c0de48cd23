use common::listing::Breadcrumb;
use dioxus::prelude::*;

use crate::routes::Route;

/// Ancestor links ending with the current category, which is not a link.
#[component]
pub fn ListingBreadcrumbs(breadcrumbs: Vec<Breadcrumb>) -> Element {
    let last = breadcrumbs.len().saturating_sub(1);
    rsx! {
        nav {
            style: "font-size: 14px; color: rgb(75, 87, 112);",
            for (index, crumb) in breadcrumbs.iter().cloned().enumerate() {
                span {
                    key: "{crumb.id}",
                    if index > 0 { " / " }
                    if let Some(route) = Route::from_breadcrumb(&crumb).filter(|_| index < last) {
                        Link { to: route, "{crumb.name}" }
                    } else {
                        b { "{crumb.name}" }
                    }
                }
            }
        }
    }
}
