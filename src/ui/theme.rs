//! Color palette.

use ratatui::style::Color;

/// Border color for panels
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent for the active tab, selections and the user's own messages
pub const COLOR_ACCENT: Color = Color::Cyan;

/// Assistant message text
pub const COLOR_ASSISTANT: Color = Color::White;

/// Dim text for hints and secondary fields
pub const COLOR_DIM: Color = Color::DarkGray;

/// Toast / status line
pub const COLOR_TOAST: Color = Color::Yellow;

/// The streaming indicator
pub const COLOR_STREAMING: Color = Color::LightGreen;

/// The crisis-resources emergency banner
pub const COLOR_EMERGENCY: Color = Color::LightRed;
