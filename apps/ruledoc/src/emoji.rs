//! Glyphs used in notices, legends and table cells.

pub const EMOJI_CONFIG_ERROR: &str = "💼";
pub const EMOJI_CONFIG_WARN: &str = "⚠️";
pub const EMOJI_CONFIG_OFF: &str = "🚫";
pub const EMOJI_DEPRECATED: &str = "❌";
pub const EMOJI_FIXABLE: &str = "🔧";
pub const EMOJI_HAS_SUGGESTIONS: &str = "💡";
pub const EMOJI_OPTIONS: &str = "⚙️";
pub const EMOJI_REQUIRES_TYPE_CHECKING: &str = "💭";
pub const EMOJI_TYPE: &str = "🗂️";

pub const EMOJI_TYPE_PROBLEM: &str = "❗";
pub const EMOJI_TYPE_SUGGESTION: &str = "📖";
pub const EMOJI_TYPE_LAYOUT: &str = "📏";

/// Emojis applied to well-known config names unless the user overrides them.
pub const DEFAULT_CONFIG_EMOJIS: &[(&str, &str)] = &[
    ("a11y", "♿"),
    ("all", "🌐"),
    ("error", "❗"),
    ("errors", "❗"),
    ("recommended", "✅"),
    ("strict", "🔒"),
    ("style", "🎨"),
    ("stylistic", "🎨"),
    ("typescript", "⌨️"),
    ("warning", "🚸"),
    ("warnings", "🚸"),
];

/// Default emoji for a config name, if it is one of the well-known names.
pub fn default_config_emoji(config: &str) -> Option<&'static str> {
    DEFAULT_CONFIG_EMOJIS
        .iter()
        .find(|(name, _)| *name == config)
        .map(|(_, emoji)| *emoji)
}
