//! Consistent color palette for the dashboard
//!
//! All panels use these constants so the console reads uniformly.

use ratatui::style::Color;

/// Color palette for dashboard elements
pub struct DashboardColors;

impl DashboardColors {
    /// Running, healthy, live state (Green)
    pub const SUCCESS: Color = Color::Green;

    /// Stale data, pending attention (Yellow)
    pub const WARNING: Color = Color::Yellow;

    /// Failures and destructive actions (Red)
    pub const ERROR: Color = Color::Red;

    /// Stopped, neutral, secondary information (Gray)
    pub const IDLE: Color = Color::Gray;

    /// Panel borders
    pub const BORDER: Color = Color::DarkGray;

    /// Secondary text (dates, hints)
    pub const SECONDARY: Color = Color::DarkGray;

    /// Highlight for the focused form field
    pub const FOCUS: Color = Color::Cyan;
}
