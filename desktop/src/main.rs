#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;
use tracing::info;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Home, Stats};
use ui::StatsConfig;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/")]
    Home {},
    #[route("/stats")]
    Stats {},
}

/// Overrides the location of the activity feed file.
const DATA_ENV: &str = "VELOSTAT_DATA";

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@3.9.1/dist/chart.min.js";
const CHART_DATE_ADAPTER: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3.0.0/dist/chartjs-adapter-date-fns.bundle.min.js";

#[cfg(feature = "desktop")]
fn main() {
    dioxus::logger::initialize_default();
    let resource_dir = resolve_resource_dir();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Velostat – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    dioxus::logger::initialize_default();
    LaunchBuilder::server().launch(App);
}

fn nav_home(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Home {}, "{label}" })
}
fn nav_stats(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Stats {}, "{label}" })
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        home: nav_home,
        stats: nav_stats,
    });

    let config = use_hook(stats_config);
    ui::use_app_services(config);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }
        document::Script { src: CHART_JS }
        document::Script { src: CHART_DATE_ADAPTER }

        // Keyed on the language so every view remounts with fresh strings.
        div {
            key: "{lang_code()}",
            Router::<Route> { }
        }
    }
}

/// Desktop reads the feed from disk instead of an HTTP origin.
fn stats_config() -> StatsConfig {
    let data_path = data_path(std::env::var_os(DATA_ENV).map(PathBuf::from), &resolve_resource_dir());
    info!(path = %data_path.display(), "activity feed location");
    StatsConfig {
        data_path: Some(data_path),
        ..StatsConfig::default()
    }
}

fn data_path(env_override: Option<PathBuf>, resource_dir: &std::path::Path) -> PathBuf {
    env_override.unwrap_or_else(|| resource_dir.join("data").join("strava.json"))
}

fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        // `cargo run` / `dx serve` read straight from the crate.
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
