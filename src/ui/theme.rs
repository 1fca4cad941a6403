//! Color theme constants.

use ratatui::style::Color;

/// Panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Title and headings
pub const COLOR_HEADER: Color = Color::White;

/// Labels and hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Progress bar fill
pub const COLOR_PROGRESS: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Completed analysis
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Errors of any category
pub const COLOR_ERROR: Color = Color::Red;

/// Source links
pub const COLOR_LINK: Color = Color::Cyan;

/// Keybind labels in the footer
pub const COLOR_KEY: Color = Color::Yellow;
