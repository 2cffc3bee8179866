//! Theme token tables.
//!
//! Each table is an ordered list of named tokens carrying one value per
//! concrete color scheme. The tables are written to the document as CSS
//! custom properties named `--<prefix>-<name>`, in table order.

use crate::theme::ColorScheme;

/// A named design token with a value for each concrete color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeToken {
    pub name: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

impl ThemeToken {
    pub const fn new(name: &'static str, light: &'static str, dark: &'static str) -> Self {
        Self { name, light, dark }
    }

    /// Value of this token under the given scheme.
    pub fn value(&self, scheme: ColorScheme) -> &'static str {
        match scheme {
            ColorScheme::Light => self.light,
            ColorScheme::Dark => self.dark,
        }
    }
}

/// Which table a token belongs to; determines the CSS property prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Color,
    Url,
    Shadow,
}

impl TokenKind {
    pub fn prefix(self) -> &'static str {
        match self {
            TokenKind::Color => "color",
            TokenKind::Url => "url",
            TokenKind::Shadow => "shadow",
        }
    }

    /// Property name (without the leading `--`) for a token of this kind.
    pub fn property_name(self, token: &ThemeToken) -> String {
        format!("{}-{}", self.prefix(), token.name)
    }

    pub fn tokens(self) -> &'static [ThemeToken] {
        match self {
            TokenKind::Color => COLOR_TOKENS,
            TokenKind::Url => URL_TOKENS,
            TokenKind::Shadow => SHADOW_TOKENS,
        }
    }
}

/// Tables in the order they are applied.
pub const TOKEN_KINDS: [TokenKind; 3] = [TokenKind::Color, TokenKind::Url, TokenKind::Shadow];

/// Color token mirrored into the `theme-color` meta tag.
pub const META_COLOR_TOKEN: &str = "surface-secondary";

pub const COLOR_TOKENS: &[ThemeToken] = &[
    ThemeToken::new("primary", "#3BCD9C", "#5FD3AC"),
    ThemeToken::new("primary-hover", "#34B98C", "#7FDCBD"),
    ThemeToken::new("primary-muted", "rgb(59 205 156 / 0.15)", "rgb(95 211 172 / 0.15)"),
    ThemeToken::new("on-primary", "#FFFFFF", "#0A1A14"),
    ThemeToken::new("secondary", "#6C7A89", "#8E9BAA"),
    ThemeToken::new("secondary-hover", "#5D6A78", "#A4AFBC"),
    ThemeToken::new("on-secondary", "#FFFFFF", "#12161B"),
    ThemeToken::new("background", "rgb(235 235 235)", "rgb(22 26 33)"),
    ThemeToken::new("surface-primary", "#FFFFFF", "#1F252E"),
    ThemeToken::new("surface-secondary", "#F5F5F5", "#2B323C"),
    ThemeToken::new("overlay", "rgb(0 0 0 / 0.4)", "rgb(0 0 0 / 0.6)"),
    ThemeToken::new("hover", "rgb(0 0 0 / 0.05)", "rgb(255 255 255 / 0.05)"),
    ThemeToken::new("hover-accent", "rgb(0 0 0 / 0.1)", "rgb(255 255 255 / 0.1)"),
    ThemeToken::new("divider", "rgb(0 0 0 / 0.12)", "rgb(255 255 255 / 0.12)"),
    ThemeToken::new("divider-muted", "rgb(0 0 0 / 0.06)", "rgb(255 255 255 / 0.06)"),
    ThemeToken::new("input-background", "#FFFFFF", "#161A21"),
    ThemeToken::new("input-border", "#CED4DA", "#3D4551"),
    ThemeToken::new("text-primary", "#1F2328", "#EBEBEB"),
    ThemeToken::new("text-secondary", "#57606A", "#AAB2BD"),
    ThemeToken::new("text-help", "#8C959F", "#7D8590"),
    ThemeToken::new("text-inverse", "#FFFFFF", "#1F2328"),
    ThemeToken::new("link", "#0969DA", "#58A6FF"),
    ThemeToken::new("success", "#2DA44E", "#3FB950"),
    ThemeToken::new("success-hover", "#268E43", "#56D364"),
    ThemeToken::new("warning", "#E3A008", "#F0B72F"),
    ThemeToken::new("warning-hover", "#C98F07", "#F5C85B"),
    ThemeToken::new("danger", "#D73A49", "#F85149"),
    ThemeToken::new("danger-hover", "#BD2C3B", "#FF7B72"),
    ThemeToken::new("info", "#1F6FEB", "#58A6FF"),
    ThemeToken::new("print-progress", "#3BCD9C", "#5FD3AC"),
    ThemeToken::new("print-failure", "#D73A49", "#F85149"),
    ThemeToken::new("print-paused", "#E3A008", "#F0B72F"),
    ThemeToken::new("chart-line", "#1F6FEB", "#58A6FF"),
    ThemeToken::new("chart-grid", "rgb(0 0 0 / 0.08)", "rgb(255 255 255 / 0.08)"),
    ThemeToken::new("scrollbar", "rgb(0 0 0 / 0.2)", "rgb(255 255 255 / 0.2)"),
];

pub const URL_TOKENS: &[ThemeToken] = &[
    ThemeToken::new(
        "logo-full",
        "url('/static/img/logo-full-light.svg')",
        "url('/static/img/logo-full-dark.svg')",
    ),
    ThemeToken::new(
        "logo-compact",
        "url('/static/img/logo-compact-light.svg')",
        "url('/static/img/logo-compact-dark.svg')",
    ),
    ThemeToken::new(
        "printer-placeholder",
        "url('/static/img/printer-placeholder-light.png')",
        "url('/static/img/printer-placeholder-dark.png')",
    ),
    ThemeToken::new(
        "empty-state",
        "url('/static/img/empty-state-light.svg')",
        "url('/static/img/empty-state-dark.svg')",
    ),
    ThemeToken::new(
        "hero-background",
        "url('/static/img/hero-background-light.jpg')",
        "url('/static/img/hero-background-dark.jpg')",
    ),
];

pub const SHADOW_TOKENS: &[ThemeToken] = &[
    ThemeToken::new(
        "top-nav",
        "0 2px 4px rgb(0 0 0 / 0.08)",
        "0 2px 4px rgb(0 0 0 / 0.4)",
    ),
    ThemeToken::new(
        "card",
        "0 1px 3px rgb(0 0 0 / 0.1), 0 1px 2px rgb(0 0 0 / 0.06)",
        "0 1px 3px rgb(0 0 0 / 0.5), 0 1px 2px rgb(0 0 0 / 0.3)",
    ),
    ThemeToken::new(
        "popover",
        "0 4px 12px rgb(0 0 0 / 0.15)",
        "0 4px 12px rgb(0 0 0 / 0.6)",
    ),
    ThemeToken::new(
        "modal",
        "0 8px 24px rgb(0 0 0 / 0.2)",
        "0 8px 24px rgb(0 0 0 / 0.7)",
    ),
    ThemeToken::new("input-focus", "0 0 0 3px rgb(59 205 156 / 0.25)", "0 0 0 3px rgb(95 211 172 / 0.25)"),
];

/// Look up a token by name in one table.
pub fn find_token(kind: TokenKind, name: &str) -> Option<&'static ThemeToken> {
    kind.tokens().iter().find(|token| token.name == name)
}
