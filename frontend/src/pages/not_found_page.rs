use dioxus::prelude::*;

#[component]
pub fn NotFoundPage(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        Title { "Page not found" }
        div {
            style: "margin: 30px; font-size: 22px; color: rgb(75, 87, 112);",
            "Nothing lives at /{path}"
        }
    }
}
