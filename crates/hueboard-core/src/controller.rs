//! Theme controller tying storage, OS preference and the document together.

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::storage::PreferenceStore;
use crate::system::ColorSchemeQuery;
use crate::theme::{
    ColorScheme, StyleSink, Theme, current_theme_value, default_theme_for_key,
    init_theme_with_meta,
};

/// Owns the capabilities a page needs to pick and paint a theme.
///
/// The calling UI serializes theme changes; the controller does no locking.
pub struct ThemeController<S, Q, K> {
    store: Option<S>,
    query: Q,
    sink: K,
    storage_key: String,
    meta_tag: String,
    selected: Theme,
    resolved: Option<ColorScheme>,
}

impl<S, Q, K> ThemeController<S, Q, K>
where
    S: PreferenceStore,
    Q: ColorSchemeQuery,
    K: StyleSink,
{
    /// `store` is `None` when the host offers no preference storage.
    pub fn new(store: Option<S>, query: Q, sink: K, config: &ThemeConfig) -> Self {
        Self {
            store,
            query,
            sink,
            storage_key: config.storage_key.clone(),
            meta_tag: config.meta_tag.clone(),
            selected: crate::theme::FALLBACK_THEME,
            resolved: None,
        }
    }

    /// Load the saved selection and paint it.
    pub fn init(&mut self) -> ColorScheme {
        self.selected = default_theme_for_key(
            self.store.as_ref().map(|s| s as &dyn PreferenceStore),
            &self.storage_key,
        );
        tracing::info!("Initial theme: {}", self.selected);
        self.apply()
    }

    /// Change the selection, persist it, and paint it.
    ///
    /// The theme is applied even when persisting fails; the persistence error
    /// is returned afterwards.
    pub fn select(&mut self, theme: Theme) -> Result<ColorScheme> {
        self.selected = theme;
        let scheme = self.apply();

        if let Some(store) = &self.store {
            store.set(&self.storage_key, theme.as_str())?;
        }
        Ok(scheme)
    }

    /// React to an OS color-scheme change.
    ///
    /// Only a `System` selection follows the OS; returns the newly applied
    /// scheme, or `None` when nothing was repainted.
    pub fn system_preference_changed(&mut self) -> Option<ColorScheme> {
        if self.selected != Theme::System {
            return None;
        }
        Some(self.apply())
    }

    pub fn selected(&self) -> Theme {
        self.selected
    }

    /// The scheme last painted, if any.
    pub fn resolved(&self) -> Option<ColorScheme> {
        self.resolved
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    fn apply(&mut self) -> ColorScheme {
        let scheme = current_theme_value(self.selected, &self.query);
        init_theme_with_meta(&mut self.sink, scheme, &self.meta_tag);
        self.resolved = Some(scheme);
        scheme
    }
}
