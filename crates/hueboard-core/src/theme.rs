//! Theme selection, resolution and application.
//!
//! A [`Theme`] is what the user picks; a [`ColorScheme`] is what actually gets
//! painted. `System` is resolved through a [`ColorSchemeQuery`] before any
//! token lookup, so the appliers only ever see `Light` or `Dark`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::storage::PreferenceStore;
use crate::system::ColorSchemeQuery;
use crate::tokens::{META_COLOR_TOKEN, TOKEN_KINDS, TokenKind};

/// Storage key holding the user's last selected theme.
pub const THEME_STORAGE_KEY: &str = "colorTheme";

/// Meta tag themed with the secondary surface color (browser chrome).
pub const THEME_COLOR_META: &str = "theme-color";

/// Theme used when nothing usable is persisted.
pub const FALLBACK_THEME: Theme = Theme::Dark;

/// User-facing theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Light" | "light" => Ok(Theme::Light),
            "Dark" | "dark" => Ok(Theme::Dark),
            "System" | "system" => Ok(Theme::System),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }
}

/// A concrete, paintable scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_theme(self) -> Theme {
        match self {
            ColorScheme::Light => Theme::Light,
            ColorScheme::Dark => Theme::Dark,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_theme().as_str())
    }
}

/// The theme the user last saved, or [`FALLBACK_THEME`].
///
/// `store` is `None` when preference storage is not available at all. Read
/// failures and unrecognized values also fall back; this never errors.
pub fn default_theme(store: Option<&dyn PreferenceStore>) -> Theme {
    default_theme_for_key(store, THEME_STORAGE_KEY)
}

/// [`default_theme`] with a custom storage key.
pub fn default_theme_for_key(store: Option<&dyn PreferenceStore>, key: &str) -> Theme {
    let Some(store) = store else {
        return FALLBACK_THEME;
    };

    match store.get(key) {
        Ok(Some(saved)) => saved.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unrecognized saved theme '{}'", saved);
            FALLBACK_THEME
        }),
        Ok(None) => FALLBACK_THEME,
        Err(e) => {
            tracing::debug!("Theme preference unavailable: {}", e);
            FALLBACK_THEME
        }
    }
}

/// Persist a theme selection under [`THEME_STORAGE_KEY`].
pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) -> Result<()> {
    store.set(THEME_STORAGE_KEY, theme.as_str())
}

/// Resolve a selection to a concrete scheme.
///
/// `System` consults `query` on every call: light only when the host
/// supports the query and reports a light preference, dark otherwise.
pub fn current_theme_value(theme: Theme, query: &dyn ColorSchemeQuery) -> ColorScheme {
    match theme {
        Theme::Light => ColorScheme::Light,
        Theme::Dark => ColorScheme::Dark,
        Theme::System => {
            if query.supports_color_scheme_query() && query.prefers_light() {
                ColorScheme::Light
            } else {
                ColorScheme::Dark
            }
        }
    }
}

/// Destination for theme writes: the document root's style and its meta tags.
pub trait StyleSink {
    /// Set a custom property. `name` includes the leading `--`.
    fn set_property(&mut self, name: &str, value: &str);

    /// Overwrite the `content` of `<meta name="{meta}">`.
    ///
    /// Returns [`Error::MetaTagMissing`] when the document has no such tag.
    fn set_meta_content(&mut self, meta: &str, content: &str) -> Result<()>;
}

/// Apply `scheme` to `sink`, mirroring the secondary surface color into the
/// [`THEME_COLOR_META`] tag.
pub fn init_theme(sink: &mut dyn StyleSink, scheme: ColorScheme) {
    init_theme_with_meta(sink, scheme, THEME_COLOR_META);
}

/// [`init_theme`] with a custom meta tag name.
///
/// Colors are written first, then URLs, then shadows. A missing meta tag is
/// logged and skipped; the remaining property writes still happen.
pub fn init_theme_with_meta(sink: &mut dyn StyleSink, scheme: ColorScheme, meta_tag: &str) {
    for kind in TOKEN_KINDS {
        for token in kind.tokens() {
            let value = token.value(scheme);
            sink.set_property(&format!("--{}", kind.property_name(token)), value);

            if kind == TokenKind::Color
                && token.name == META_COLOR_TOKEN
                && let Err(e) = sink.set_meta_content(meta_tag, value)
            {
                tracing::warn!("Skipping browser chrome color: {}", e);
            }
        }
    }

    tracing::debug!("Applied {} theme", scheme);
}

/// Generate the `:root` CSS variable block for a scheme.
pub fn css_vars_block(scheme: ColorScheme) -> String {
    let mut css = String::from(":root {\n");
    let mut current_kind = None;

    for kind in TOKEN_KINDS {
        for token in kind.tokens() {
            if current_kind != Some(kind) {
                if current_kind.is_some() {
                    css.push('\n');
                }
                css.push_str(&format!("    /* ===== {} ===== */\n", section_title(kind)));
                current_kind = Some(kind);
            }
            css.push_str(&format!(
                "    --{}: {};\n",
                kind.property_name(token),
                token.value(scheme)
            ));
        }
    }

    css.push_str("}\n");
    css
}

fn section_title(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Color => "Colors",
        TokenKind::Url => "Images",
        TokenKind::Shadow => "Shadows",
    }
}

/// In-memory [`StyleSink`] that records writes.
///
/// Properties keep first-insertion order, like a style declaration. Meta tags
/// must be declared with [`StyleSheet::with_meta_tag`] to exist.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    properties: Vec<(String, String)>,
    meta_tags: Vec<(String, Option<String>)>,
    writes: usize,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a `<meta name="...">` tag present in the document.
    pub fn with_meta_tag(mut self, name: &str) -> Self {
        if !self.meta_tags.iter().any(|(n, _)| n == name) {
            self.meta_tags.push((name.to_string(), None));
        }
        self
    }

    /// Current value of a property. The leading `--` is optional.
    pub fn property(&self, name: &str) -> Option<&str> {
        let name = name.trim_start_matches("--");
        self.properties
            .iter()
            .find(|(n, _)| n.trim_start_matches("--") == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Content of a declared meta tag, if it has been set.
    pub fn meta_content(&self, name: &str) -> Option<&str> {
        self.meta_tags
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, content)| content.as_deref())
    }

    /// Total number of property writes so far, including overwrites.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StyleSink for StyleSheet {
    fn set_property(&mut self, name: &str, value: &str) {
        self.writes += 1;
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.properties.push((name.to_string(), value.to_string())),
        }
    }

    fn set_meta_content(&mut self, meta: &str, content: &str) -> Result<()> {
        match self.meta_tags.iter_mut().find(|(n, _)| n == meta) {
            Some((_, existing)) => {
                *existing = Some(content.to_string());
                Ok(())
            }
            None => Err(Error::MetaTagMissing(meta.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::system::FixedColorScheme;
    use crate::tokens::{COLOR_TOKENS, SHADOW_TOKENS, URL_TOKENS, find_token};

    fn total_tokens() -> usize {
        COLOR_TOKENS.len() + URL_TOKENS.len() + SHADOW_TOKENS.len()
    }

    #[test]
    fn test_theme_parse_and_display() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!("Sepia".parse::<Theme>(), Err(Error::UnknownTheme(_))));
    }

    #[test]
    fn test_default_theme_without_storage_is_dark() {
        assert_eq!(default_theme(None), Theme::Dark);
    }

    #[test]
    fn test_default_theme_unavailable_storage_is_dark() {
        let store = MemoryStore::unavailable();
        assert_eq!(default_theme(Some(&store)), Theme::Dark);
    }

    #[test]
    fn test_default_theme_empty_storage_is_dark() {
        let store = MemoryStore::new();
        assert_eq!(default_theme(Some(&store)), Theme::Dark);
    }

    #[test]
    fn test_default_theme_reads_saved_value() {
        let store = MemoryStore::new().with(THEME_STORAGE_KEY, "Light");
        assert_eq!(default_theme(Some(&store)), Theme::Light);

        let store = MemoryStore::new().with(THEME_STORAGE_KEY, "System");
        assert_eq!(default_theme(Some(&store)), Theme::System);
    }

    #[test]
    fn test_default_theme_garbage_value_falls_back() {
        let store = MemoryStore::new().with(THEME_STORAGE_KEY, "Neon");
        assert_eq!(default_theme(Some(&store)), Theme::Dark);
    }

    #[test]
    fn test_save_theme_then_default() {
        let store = MemoryStore::new();
        save_theme(&store, Theme::Light).unwrap();
        assert_eq!(
            store.get(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("Light")
        );
        assert_eq!(default_theme(Some(&store)), Theme::Light);
    }

    #[test]
    fn test_current_theme_value_system() {
        assert_eq!(
            current_theme_value(Theme::System, &FixedColorScheme::light()),
            ColorScheme::Light
        );
        assert_eq!(
            current_theme_value(Theme::System, &FixedColorScheme::dark()),
            ColorScheme::Dark
        );
        assert_eq!(
            current_theme_value(Theme::System, &FixedColorScheme::unsupported()),
            ColorScheme::Dark
        );
    }

    #[test]
    fn test_current_theme_value_explicit_ignores_os() {
        for query in [
            FixedColorScheme::light(),
            FixedColorScheme::dark(),
            FixedColorScheme::unsupported(),
        ] {
            assert_eq!(current_theme_value(Theme::Light, &query), ColorScheme::Light);
            assert_eq!(current_theme_value(Theme::Dark, &query), ColorScheme::Dark);
        }
    }

    #[test]
    fn test_init_theme_light_values() {
        let mut sheet = StyleSheet::new().with_meta_tag(THEME_COLOR_META);
        init_theme(&mut sheet, ColorScheme::Light);

        assert_eq!(sheet.property("--color-primary"), Some("#3BCD9C"));
        assert_eq!(sheet.property("--color-background"), Some("rgb(235 235 235)"));
        assert_eq!(sheet.properties().len(), total_tokens());
    }

    #[test]
    fn test_init_theme_dark_values() {
        let mut sheet = StyleSheet::new().with_meta_tag(THEME_COLOR_META);
        init_theme(&mut sheet, ColorScheme::Dark);
        assert_eq!(sheet.property("color-primary"), Some("#5FD3AC"));
    }

    #[test]
    fn test_init_theme_sets_meta_tag() {
        let mut sheet = StyleSheet::new().with_meta_tag(THEME_COLOR_META);
        init_theme(&mut sheet, ColorScheme::Light);

        let surface = find_token(TokenKind::Color, META_COLOR_TOKEN).unwrap();
        assert_eq!(
            sheet.meta_content(THEME_COLOR_META),
            Some(surface.value(ColorScheme::Light))
        );
    }

    #[test]
    fn test_init_theme_without_meta_tag_still_writes_everything() {
        let mut sheet = StyleSheet::new();
        init_theme(&mut sheet, ColorScheme::Dark);

        assert_eq!(sheet.meta_content(THEME_COLOR_META), None);
        assert_eq!(sheet.properties().len(), total_tokens());
        assert!(sheet.property("--shadow-card").is_some());
    }

    #[test]
    fn test_init_theme_order_colors_urls_shadows() {
        let mut sheet = StyleSheet::new();
        init_theme(&mut sheet, ColorScheme::Light);

        let names: Vec<&str> = sheet.properties().iter().map(|(n, _)| n.as_str()).collect();
        let first_url = names.iter().position(|n| n.starts_with("--url-")).unwrap();
        let first_shadow = names.iter().position(|n| n.starts_with("--shadow-")).unwrap();

        assert_eq!(first_url, COLOR_TOKENS.len());
        assert_eq!(first_shadow, COLOR_TOKENS.len() + URL_TOKENS.len());
        assert!(names[..first_url].iter().all(|n| n.starts_with("--color-")));
    }

    #[test]
    fn test_init_theme_is_idempotent() {
        let mut sheet = StyleSheet::new().with_meta_tag(THEME_COLOR_META);
        init_theme(&mut sheet, ColorScheme::Light);
        let first = sheet.properties().to_vec();

        init_theme(&mut sheet, ColorScheme::Light);
        assert_eq!(sheet.properties(), first.as_slice());
        assert_eq!(sheet.write_count(), 2 * total_tokens());
    }

    #[test]
    fn test_init_theme_switch_overwrites() {
        let mut sheet = StyleSheet::new().with_meta_tag(THEME_COLOR_META);
        init_theme(&mut sheet, ColorScheme::Light);
        init_theme(&mut sheet, ColorScheme::Dark);

        assert_eq!(sheet.property("--color-primary"), Some("#5FD3AC"));
        assert_eq!(sheet.properties().len(), total_tokens());
    }

    #[test]
    fn test_css_vars_block_contains_expected_vars() {
        let css = css_vars_block(ColorScheme::Light);

        assert!(css.starts_with(":root {"));
        assert!(css.contains("--color-primary: #3BCD9C;"));
        assert!(css.contains("--color-background: rgb(235 235 235);"));
        assert!(css.contains("--url-logo-full:"));
        assert!(css.contains("--shadow-card:"));
        assert!(css.trim_end().ends_with('}'));
    }

    #[test]
    fn test_css_vars_block_matches_applied_properties() {
        let mut sheet = StyleSheet::new();
        init_theme(&mut sheet, ColorScheme::Dark);
        let css = css_vars_block(ColorScheme::Dark);

        for (name, value) in sheet.properties() {
            assert!(css.contains(&format!("{}: {};", name, value)), "{}", name);
        }
    }

    #[test]
    fn test_css_vars_block_sections_in_order() {
        let css = css_vars_block(ColorScheme::Light);
        let colors = css.find("/* ===== Colors ===== */").unwrap();
        let images = css.find("/* ===== Images ===== */").unwrap();
        let shadows = css.find("/* ===== Shadows ===== */").unwrap();
        assert!(colors < images && images < shadows);
    }

    #[test]
    fn test_style_sheet_set_property_overwrites_in_place() {
        let mut sheet = StyleSheet::new();
        sheet.set_property("--color-primary", "#000");
        sheet.set_property("--color-accent", "#111");
        sheet.set_property("--color-primary", "#222");

        assert_eq!(sheet.property("color-primary"), Some("#222"));
        assert_eq!(sheet.properties()[0].0, "--color-primary");
        assert_eq!(sheet.write_count(), 3);
    }
}
