use dioxus::prelude::*;

use crate::core::theme::{ThemeHandle, ThemeMode};
use crate::t;

/// Switches between the light and dark theme. Listeners registered on the shared
/// [`ThemeHandle`] (the app shell, the statistics chart) react to the change.
#[component]
pub fn ThemeToggle() -> Element {
    let theme = use_context::<ThemeHandle>();
    let mode = use_context::<Signal<ThemeMode>>();

    let caption = if mode().is_dark() {
        t!("theme-toggle-light")
    } else {
        t!("theme-toggle-dark")
    };

    rsx! {
        button {
            r#type: "button",
            class: "button button--ghost theme-toggle",
            aria_pressed: mode().is_dark(),
            onclick: move |_| {
                theme.toggle();
            },
            "{caption}"
        }
    }
}
