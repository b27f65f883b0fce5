//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse green for FOUND tags.
    pub const TAG_FOUND: &str = "\x1b[1;7;32m";
    /// Bold reverse red for NO PATH tags.
    pub const TAG_MISSING: &str = "\x1b[1;7;31m";
    /// Bright bold white for emphasis (vertex ids, costs).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (timings, hints).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for coordinates.
    pub const CYAN: &str = "\x1b[36m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_found: &'static str,
    pub tag_missing: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_found: colors::TAG_FOUND,
            tag_missing: colors::TAG_MISSING,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_found: "",
            tag_missing: "",
            white_bold: "",
            gray: "",
            cyan: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_palette_colored() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.reset, colors::RESET);
        assert_eq!(palette.tag_found, colors::TAG_FOUND);
        assert!(palette.tag_missing.starts_with("\x1b["));
    }

    #[test]
    fn test_color_palette_plain() {
        let palette = ColorPalette::plain();
        assert_eq!(palette.reset, "");
        assert_eq!(palette.tag_found, "");
        assert_eq!(palette.cyan, "");
    }
}
