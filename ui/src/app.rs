//! Context every shell installs at the root of its component tree.

use dioxus::prelude::*;
use tracing::{debug, info};

use crate::core::config::StatsConfig;
use crate::core::platform::Platform;
use crate::core::storage::default_store;
use crate::core::theme::{ThemeHandle, ThemeMode};

/// Provide the shared theme, a reactive mirror of its mode and the statistics config.
///
/// The mode signal follows every theme change and keeps `body.dark` in sync, so the page
/// chrome and the chart switch together.
pub fn use_app_services(config: StatsConfig) {
    let theme = use_context_provider(|| {
        let handle = ThemeHandle::new(default_store());
        info!(
            platform = Platform::current().label(),
            theme = handle.mode().as_str(),
            "theme restored"
        );
        handle
    });
    let mut mode = use_context_provider(|| Signal::new(theme.mode()));
    use_context_provider(|| config);

    let subscription = use_hook(|| theme.subscribe(move |next| mode.set(next)));
    use_drop({
        let theme = theme.clone();
        move || {
            theme.unsubscribe(subscription);
        }
    });

    use_effect(move || {
        let current = mode();
        document::eval(&body_class_script(current));
        debug!(theme = current.as_str(), "body theme class applied");
    });
}

fn body_class_script(mode: ThemeMode) -> String {
    format!(
        "document.body.classList.toggle('dark', {});",
        mode.is_dark()
    )
}
