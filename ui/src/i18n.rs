//! Localization for `velostat-ui`.
//!
//! `i18n-embed` selects the language, `fluent` formats messages, `rust-embed` embeds the
//! `.ftl` files at compile time and `i18n-embed-fl` checks message IDs and arguments.
//!
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/velostat-ui.ftl   (fallback/reference)
//!   de-DE/velostat-ui.ftl
//! ```
//!
//! Call [`init`] once at startup (it is idempotent), then look strings up with `t!`:
//! ```ignore
//! use crate::t;
//! crate::i18n::init();
//! let label = t!("stats-group-week");
//! let line = t!("tooltip-distance", value = "42.2 km");
//! ```
//!
//! Desktop requests the OS locale list, the browser build uses `navigator.languages`.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::warn;
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// `t!("key")` / `t!("key", arg = value)`, routed through the shared [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fallback file path is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "velostat-ui";

const FALLBACK: LanguageIdentifier = langid!("en-US");

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, FALLBACK));

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        if let Err(err) = select(&requested_languages()) {
            warn!(%err, "failed selecting languages; continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    select(&[lang])
}

/// `select` rebuilds the bundles with isolation on, so it is switched off again each time.
/// Tooltip lines are drawn on a canvas where bidi isolation marks show up as glyphs.
fn select(requested: &[LanguageIdentifier]) -> Result<(), i18n_embed::I18nEmbedError> {
    let result = i18n_embed::select(&*LOADER, &Localizations, requested).map(|_| ());
    LOADER.set_use_isolating(false);
    result
}

/// Serialises tests that switch the global language or assert localized text.
#[cfg(test)]
pub(crate) fn test_language_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Language tag currently answering lookups.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded language identifiers, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
