//! Display formatting and data extraction helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A notification delivery channel (email, telegram, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
    pub channel_name: String,
}

impl NotificationChannel {
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
        }
    }
}

/// Settings key for one option of a channel, e.g. `email_enabled`.
pub fn get_notification_setting_key(channel: &NotificationChannel, key: &str) -> String {
    format!("{}_{}", channel.channel_name, key)
}

/// Turn a raw sensor name such as `heat_index` or `TOOL_0` into a title.
///
/// Underscores become spaces, the string is lowercased, then the first
/// letter of every whitespace-separated word is uppercased.
pub fn temperature_display_name(name: &str) -> String {
    let lowered = name.replace('_', " ").to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut at_word_start = true;
    for c in lowered.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// JSON path of the normalized score in a prediction record.
const PUBLIC_P_PATH: &[&str] = &["p"];
const PRIVATE_P_PATH: &[&str] = &["fields", "normalized_p"];

/// Round half up, the way a browser's `Math.round` does.
fn round_half_up(x: f64) -> f64 {
    // `(x + 0.5).floor()` rounds 0.49999999999999994 up to 1.
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Walk `path` through nested objects, yielding `None` on any gap.
fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Score of the prediction nearest `position` (0.0 to 1.0) along the series.
///
/// The index is `round_half_up(len * position)`. Public records keep the
/// score at `p`, private ones at `fields.normalized_p`. Any miss (index out of
/// range, missing field, non-numeric value) yields `0.0`.
pub fn get_normalized_p(predictions: &[Value], position: f64, is_public: bool) -> f64 {
    let raw_index = round_half_up(predictions.len() as f64 * position);
    if !raw_index.is_finite() || raw_index < 0.0 {
        return 0.0;
    }

    let path = if is_public {
        PUBLIC_P_PATH
    } else {
        PRIVATE_P_PATH
    };

    predictions
        .get(raw_index as usize)
        .and_then(|record| lookup(record, path))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}
