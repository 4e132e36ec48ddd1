//! State indicator widget - Color-coded status badges
//!
//! Visual indicators for the toggle and freshness states shown by the
//! status panel.

use crate::colors::DashboardColors;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// State types for visual indication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateType {
    /// Loop is running
    Running,
    /// Loop is stopped
    Stopped,
    /// Cache mirrors the last backend read
    Live,
    /// Cache holds last-known values only
    Stale,
}

/// State indicator widget
pub struct StateIndicator {
    state_type: StateType,
    text: String,
}

impl StateIndicator {
    /// Create new state indicator
    pub fn new(state_type: StateType, text: impl Into<String>) -> Self {
        Self {
            state_type,
            text: text.into(),
        }
    }

    fn color(&self) -> Color {
        match self.state_type {
            StateType::Running => DashboardColors::SUCCESS,
            StateType::Stopped => DashboardColors::IDLE,
            StateType::Live => DashboardColors::SUCCESS,
            StateType::Stale => DashboardColors::WARNING,
        }
    }

    fn icon(&self) -> &'static str {
        match self.state_type {
            StateType::Running => "●",
            StateType::Stopped => "○",
            StateType::Live => "✓",
            StateType::Stale => "◐",
        }
    }

    /// Render as a styled span
    pub fn render(&self) -> Span<'static> {
        Span::styled(
            format!("{} {}", self.icon(), self.text),
            Style::default().fg(self.color()).add_modifier(Modifier::BOLD),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_colors() {
        assert_eq!(
            StateIndicator::new(StateType::Running, "").color(),
            DashboardColors::SUCCESS
        );
        assert_eq!(
            StateIndicator::new(StateType::Stopped, "").color(),
            DashboardColors::IDLE
        );
        assert_eq!(
            StateIndicator::new(StateType::Stale, "").color(),
            DashboardColors::WARNING
        );
    }

    #[test]
    fn test_render_carries_icon_and_text() {
        let span = StateIndicator::new(StateType::Running, "Polling").render();
        assert!(span.content.contains("●"));
        assert!(span.content.contains("Polling"));
    }
}
