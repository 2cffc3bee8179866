//! Command handlers. Each returns output text so `main` only prints.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde_json::Value;

use hueboard_core::theme::default_theme_for_key;
use hueboard_core::{
    Config, FileStore, PreferenceStore, StyleSheet, Theme, ThemeController, get_normalized_p,
};

fn open_store(config: &Config) -> Option<FileStore> {
    let store = config.storage.open();
    if store.is_none() {
        tracing::debug!("No preference storage location available");
    }
    store
}

/// Render the `:root` block and meta tag for `theme`, or for the saved
/// selection when `theme` is `None`.
pub fn render_css(config: &Config, theme: Option<Theme>) -> String {
    let theme = theme.unwrap_or_else(|| saved_theme(config));
    let query = config.theme.system_query();
    let scheme = hueboard_core::current_theme_value(theme, query.as_ref());

    // The meta tag content comes from the same applier the document uses.
    let mut sheet = StyleSheet::new().with_meta_tag(&config.theme.meta_tag);
    hueboard_core::theme::init_theme_with_meta(&mut sheet, scheme, &config.theme.meta_tag);

    let mut out = hueboard_core::css_vars_block(scheme);
    if let Some(content) = sheet.meta_content(&config.theme.meta_tag) {
        out.push_str(&format!(
            "<meta name=\"{}\" content=\"{}\">\n",
            config.theme.meta_tag, content
        ));
    }
    out
}

fn saved_theme(config: &Config) -> Theme {
    let store = open_store(config);
    default_theme_for_key(
        store.as_ref().map(|s| s as &dyn PreferenceStore),
        &config.theme.storage_key,
    )
}

/// One-line description of the saved theme and its resolution.
pub fn describe_theme(config: &Config) -> String {
    let theme = saved_theme(config);
    let query = config.theme.system_query();
    let scheme = hueboard_core::current_theme_value(theme, query.as_ref());
    if theme == Theme::System {
        format!("{} ({})", theme, scheme)
    } else {
        theme.to_string()
    }
}

/// Persist `theme` and return the preferences file it was written to.
pub fn save_selection(config: &Config, theme: Theme) -> anyhow::Result<PathBuf> {
    let Some(store) = open_store(config) else {
        bail!("no preference storage available (set storage.path in the config)");
    };
    let path = store.path().to_path_buf();

    let mut controller = ThemeController::new(
        Some(store),
        config.theme.system_query(),
        StyleSheet::new(),
        &config.theme,
    );
    controller
        .select(theme)
        .with_context(|| format!("failed to save theme to {}", path.display()))?;
    Ok(path)
}

/// Read a predictions array from `path` and look up the score at `position`.
pub fn percentile_from_file(path: &Path, position: f64, is_public: bool) -> anyhow::Result<f64> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let Value::Array(predictions) = value else {
        bail!("{} must contain a JSON array of predictions", path.display());
    };
    Ok(get_normalized_p(&predictions, position, is_public))
}
