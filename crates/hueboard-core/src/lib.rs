//! Core library for hueboard.
//!
//! - [`theme`]: Light/Dark/System resolution and CSS variable application
//! - [`tokens`]: the color, image and shadow token tables
//! - [`controller`]: ties a preference store, OS query and document together
//! - [`format`]: display formatting and prediction lookup helpers
//! - [`binary`]: raw-bytes / blob normalization
//! - [`config`], [`error`], [`logging`]: the usual plumbing

pub mod binary;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod logging;
pub mod storage;
pub mod system;
pub mod theme;
pub mod tokens;

pub use binary::{BinaryData, BlobSource, FileBlob, to_array_buffer};
pub use config::{Config, ConfigLoadResult, StorageConfig, ThemeConfig};
pub use controller::ThemeController;
pub use error::{Error, Result};
pub use format::{
    NotificationChannel, get_normalized_p, get_notification_setting_key, temperature_display_name,
};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use system::{ColorSchemeQuery, EnvColorSchemeQuery, FixedColorScheme};
pub use theme::{
    ColorScheme, StyleSheet, StyleSink, Theme, css_vars_block, current_theme_value, default_theme,
    init_theme, save_theme,
};
