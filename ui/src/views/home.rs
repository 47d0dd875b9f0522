use dioxus::prelude::*;

use crate::core::platform::Platform;

#[component]
pub fn Home() -> Element {
    // Re-render on language change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let platform = Platform::current().label();

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-home",
            h1 { {crate::t!("home-title")} }
            p { {crate::t!("tagline")} }
            p { {crate::t!("home-intro")} }
            p { class: "page-home__platform",
                {crate::t!("home-platform", platform = platform)}
            }
        }
    }
}
