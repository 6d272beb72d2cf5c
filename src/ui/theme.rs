//! Visual theme and styling.

use console::Style;

/// addext's visual theme.
#[derive(Debug, Clone)]
pub struct AddextTheme {
    /// Style for renames and completion (green).
    pub success: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for errors (red bold).
    pub error: Style,
    /// Style for previews (magenta).
    pub info: Style,
    /// Style for skipped files and secondary text (dim).
    pub dim: Style,
}

impl Default for AddextTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl AddextTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = AddextTheme::plain().format_success("Renamed");
        assert!(msg.contains("✓"));
        assert!(msg.contains("Renamed"));
    }

    #[test]
    fn theme_formats_warning() {
        let msg = AddextTheme::plain().format_warning("Caution");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Caution"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = AddextTheme::plain().format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }

    #[test]
    fn theme_formats_skipped() {
        let msg = AddextTheme::plain().format_skipped("Skipped");
        assert!(msg.contains("○"));
        assert!(msg.contains("Skipped"));
    }
}
