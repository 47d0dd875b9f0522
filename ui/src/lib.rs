//! Shared UI crate for Velostat: ride aggregation, the yearly distance chart and the
//! views every platform shell renders.

pub mod app;
pub mod chart;
pub mod core;
pub mod i18n;
pub mod stats;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    mod theme_toggle;
    pub use theme_toggle::ThemeToggle;
}

pub use app::use_app_services;
pub use crate::core::config::StatsConfig;
