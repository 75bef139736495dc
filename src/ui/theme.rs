//! Visual theme and styling.
//!
//! Status lines carry a bracketed tag (`[OK]`, `[INFO]`, `[WARN]`, `[ERROR]`)
//! so they stay readable when colors are off or output is captured to a log.

use console::Style;

/// The installer's visual theme.
#[derive(Debug, Clone)]
pub struct SetupTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational messages (magenta).
    pub info: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
}

impl Default for SetupTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            header: Style::new().bold().magenta(),
            command: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            header: Style::new(),
            command: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("[OK] {}", msg)))
    }

    /// Format an informational message.
    pub fn format_info(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(format!("[INFO] {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("[WARN] {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("[ERROR] {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(format!("--- {} ---", title)))
    }

    /// Format a command about to run.
    pub fn format_command(&self, command: &str) -> String {
        format!("{}", self.command.apply_to(format!("$ {}", command)))
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
        let theme = SetupTheme::plain();
        assert_eq!(theme.format_success("Node.js detected."), "[OK] Node.js detected.");
    }

    #[test]
    fn theme_formats_info() {
        let theme = SetupTheme::plain();
        assert_eq!(theme.format_info("Ready"), "[INFO] Ready");
    }

    #[test]
    fn theme_formats_warning() {
        let theme = SetupTheme::plain();
        assert_eq!(theme.format_warning("Careful"), "[WARN] Careful");
    }

    #[test]
    fn theme_formats_error() {
        let theme = SetupTheme::plain();
        let msg = theme.format_error("Node.js is not installed.");
        assert_eq!(msg, "[ERROR] Node.js is not installed.");
    }

    #[test]
    fn theme_formats_header() {
        let theme = SetupTheme::plain();
        assert_eq!(theme.format_header("Installer"), "--- Installer ---");
    }

    #[test]
    fn theme_formats_command() {
        let theme = SetupTheme::plain();
        assert_eq!(theme.format_command("npm install"), "$ npm install");
    }

    #[test]
    fn colored_theme_keeps_text() {
        let theme = SetupTheme::new();
        assert!(theme.format_error("boom").contains("boom"));
    }

    #[test]
    fn default_impl_matches_new() {
        let default = SetupTheme::default();
        let new = SetupTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
