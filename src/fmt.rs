//! Shared console output helpers

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Render an emoji, honoring `--no-emoji` (exported as `NO_EMOJI`)
///
/// # Examples
///
/// ```
/// use limit_pack::fmt::{icon, CHECKMARK};
///
/// let rendered = icon(CHECKMARK);
/// assert!(rendered == "✅" || rendered == "[OK]");
/// ```
pub fn icon(emoji: Emoji<'static, 'static>) -> String {
    if std::env::var_os("NO_EMOJI").is_some() {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_are_plain_ascii() {
        for emoji in [ROCKET, CHECKMARK, CROSSMARK, INFO, WARNING] {
            assert!(emoji.1.is_ascii());
        }
    }
}
