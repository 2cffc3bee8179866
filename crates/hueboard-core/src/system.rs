//! OS color-scheme preference queries.

use std::env;

use crate::theme::ColorScheme;

/// Read-only view of the host's `prefers-color-scheme` signal.
pub trait ColorSchemeQuery {
    /// Whether the host can answer color-scheme queries at all.
    fn supports_color_scheme_query(&self) -> bool;

    /// Whether the host currently prefers the light scheme.
    fn prefers_light(&self) -> bool;
}

impl<T: ColorSchemeQuery + ?Sized> ColorSchemeQuery for Box<T> {
    fn supports_color_scheme_query(&self) -> bool {
        (**self).supports_color_scheme_query()
    }

    fn prefers_light(&self) -> bool {
        (**self).prefers_light()
    }
}

/// A query with a fixed answer. `None` models a host without support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedColorScheme(pub Option<ColorScheme>);

impl FixedColorScheme {
    pub fn light() -> Self {
        Self(Some(ColorScheme::Light))
    }

    pub fn dark() -> Self {
        Self(Some(ColorScheme::Dark))
    }

    pub fn unsupported() -> Self {
        Self(None)
    }
}

impl ColorSchemeQuery for FixedColorScheme {
    fn supports_color_scheme_query(&self) -> bool {
        self.0.is_some()
    }

    fn prefers_light(&self) -> bool {
        self.0 == Some(ColorScheme::Light)
    }
}

/// Derives the preference from the `GTK_THEME` environment variable.
///
/// A theme named like `Adwaita:dark` or `Arc-Dark` counts as dark, any other
/// name as light. When the variable is unset the query is unsupported.
/// The variable is re-read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorSchemeQuery;

impl EnvColorSchemeQuery {
    fn scheme(&self) -> Option<ColorScheme> {
        let theme = env::var("GTK_THEME").ok()?;
        Some(scheme_from_theme_name(&theme))
    }
}

impl ColorSchemeQuery for EnvColorSchemeQuery {
    fn supports_color_scheme_query(&self) -> bool {
        self.scheme().is_some()
    }

    fn prefers_light(&self) -> bool {
        self.scheme() == Some(ColorScheme::Light)
    }
}

/// Classify a GTK-style theme name.
pub fn scheme_from_theme_name(name: &str) -> ColorScheme {
    let lower = name.trim().to_ascii_lowercase();
    if lower.ends_with(":dark") || lower.ends_with("-dark") || lower.ends_with("_dark") {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}
