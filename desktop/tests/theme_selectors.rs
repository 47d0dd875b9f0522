#![cfg(test)]
/*!
Selector lint for the shared theme (`ui/assets/theme/main.css`).

The statistics view and the theme toggle rely on these classes. A substring check is
enough to catch a rename that would silently unstyle the packaged desktop build. When a
selector is renamed on purpose, update the component markup and `REQUIRED_SELECTORS`.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    ".theme-toggle",
    // Statistics
    ".stats__controls",
    ".stats__status",
    ".stats__error",
    ".stats__chart",
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(*sel))
        .copied()
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 1_500,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

#[test]
fn dark_theme_overrides_every_colour_token() {
    let (light, rest) = THEME_CSS
        .split_once("body.dark {")
        .expect("dark theme block present");
    let dark = rest.split('}').next().unwrap_or_default();

    for line in light.lines().map(str::trim).filter(|l| l.starts_with("--color-")) {
        let token = line.split(':').next().unwrap_or_default();
        assert!(
            dark.contains(token),
            "dark theme does not override `{token}`"
        );
    }
}
