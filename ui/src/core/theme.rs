//! Light/dark theme state with an explicit observer list, plus the chart palette derived
//! from it.
//!
//! Components never read an ambient "current theme": they receive a [`ThemeHandle`]
//! through Dioxus context, subscribe for changes, and compute a [`Palette`] from the mode
//! they were notified with.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::storage::PreferenceStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> Palette {
        Palette::for_mode(self)
    }
}

/// Colour tokens for the chart. Derived from the mode on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub color: &'static str,
    pub border: &'static str,
    pub background: &'static str,
    pub point_border: &'static str,
    pub point_background: &'static str,
    pub grid_color: &'static str,
    pub grid_border: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        color: "rgb(34, 34, 34)",
        border: "rgb(72, 168, 245)",
        background: "rgba(72, 168, 245, 0.1)",
        point_border: "rgb(72, 168, 245)",
        point_background: "rgb(235, 246, 253)",
        grid_color: "rgba(0, 0, 0, 0.05)",
        grid_border: "rgba(0, 0, 0, 0.1)",
    };

    pub const DARK: Palette = Palette {
        color: "rgb(169, 169, 179)",
        border: "rgb(72, 168, 245)",
        background: "rgba(72, 168, 245, 0.1)",
        point_border: "rgb(72, 168, 245)",
        point_background: "rgb(43, 55, 64)",
        grid_color: "rgba(255, 255, 255, 0.05)",
        grid_border: "rgba(255, 255, 255, 0.1)",
    };

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::LIGHT
    }
}

pub type ListenerId = u64;

type Listener = Box<dyn FnMut(ThemeMode)>;

/// Current mode plus the listeners to notify when it changes.
pub struct Theme {
    mode: ThemeMode,
    listeners: Vec<(ListenerId, Listener)>,
    next_id: ListenerId,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Mode saved in `store`, light when absent or unrecognised.
    pub fn restore(store: &dyn PreferenceStore) -> Self {
        let mode = store
            .get(THEME_KEY)
            .and_then(|raw| ThemeMode::parse(&raw))
            .unwrap_or_default();
        Self::new(mode)
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ThemeMode) + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Persist and apply `mode`; listeners run only when the mode actually changes.
    ///
    /// A failed write is logged; the in-memory mode still switches.
    pub fn set_mode(&mut self, mode: ThemeMode, store: &mut dyn PreferenceStore) {
        if let Err(err) = store.set(THEME_KEY, mode.as_str()) {
            warn!(%err, "could not persist theme preference");
        }
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        debug!(mode = mode.as_str(), listeners = self.listeners.len(), "theme changed");
        for (_, listener) in self.listeners.iter_mut() {
            listener(mode);
        }
    }

    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> ThemeMode {
        let next = self.mode.toggled();
        self.set_mode(next, store);
        next
    }
}

/// Shared handle given to components through context.
///
/// Listeners must not call back into the same handle; they are run while the theme is
/// borrowed.
#[derive(Clone)]
pub struct ThemeHandle {
    theme: Rc<RefCell<Theme>>,
    store: Rc<RefCell<Box<dyn PreferenceStore>>>,
}

impl ThemeHandle {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let theme = Theme::restore(store.as_ref());
        Self {
            theme: Rc::new(RefCell::new(theme)),
            store: Rc::new(RefCell::new(store)),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.theme.borrow().mode()
    }

    pub fn palette(&self) -> Palette {
        self.mode().palette()
    }

    pub fn subscribe(&self, listener: impl FnMut(ThemeMode) + 'static) -> ListenerId {
        self.theme.borrow_mut().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.theme.borrow_mut().unsubscribe(id)
    }

    pub fn toggle(&self) -> ThemeMode {
        let mut store = self.store.borrow_mut();
        self.theme.borrow_mut().toggle(&mut **store)
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        let mut store = self.store.borrow_mut();
        self.theme.borrow_mut().set_mode(mode, &mut **store);
    }
}

impl PartialEq for ThemeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.theme, &other.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn restores_saved_mode() {
        let mut store = MemoryStore::new();
        assert_eq!(Theme::restore(&store).mode(), ThemeMode::Light);

        store.set(THEME_KEY, "dark").unwrap();
        assert!(Theme::restore(&store).is_dark());

        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::restore(&store).mode(), ThemeMode::Light);
    }

    #[test]
    fn toggle_persists_and_notifies() {
        let mut store = MemoryStore::new();
        let mut theme = Theme::new(ThemeMode::Light);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        theme.subscribe(move |mode| sink.borrow_mut().push(mode));

        assert_eq!(theme.toggle(&mut store), ThemeMode::Dark);
        assert_eq!(theme.toggle(&mut store), ThemeMode::Light);

        assert_eq!(*seen.borrow(), vec![ThemeMode::Dark, ThemeMode::Light]);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn unchanged_mode_is_silent() {
        let mut store = MemoryStore::new();
        let mut theme = Theme::new(ThemeMode::Dark);
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        theme.subscribe(move |_| *counter.borrow_mut() += 1);

        theme.set_mode(ThemeMode::Dark, &mut store);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let mut store = MemoryStore::new();
        let mut theme = Theme::new(ThemeMode::Light);
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let id = theme.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(theme.unsubscribe(id));
        assert!(!theme.unsubscribe(id));
        theme.toggle(&mut store);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(theme.listener_count(), 0);
    }

    #[test]
    fn palette_follows_mode() {
        assert_eq!(ThemeMode::Dark.palette().color, "rgb(169, 169, 179)");
        assert_eq!(ThemeMode::Light.palette().point_background, "rgb(235, 246, 253)");
        assert_eq!(ThemeMode::Dark.palette().border, ThemeMode::Light.palette().border);
    }

    #[test]
    fn handle_shares_state_between_clones() {
        let handle = ThemeHandle::new(Box::new(MemoryStore::new()));
        let other = handle.clone();
        other.toggle();
        assert_eq!(handle.mode(), ThemeMode::Dark);
        assert_eq!(handle.palette(), Palette::DARK);
        assert!(handle == other);
    }
}
