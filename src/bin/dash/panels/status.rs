//! Status panel - Loop toggles and reset action
//!
//! Displays backend-reported truth only: a toggle line changes when the
//! reconciling read after an action lands, never optimistically.

use crate::colors::DashboardColors;
use crate::widgets::{StateIndicator, StateType};
use newsdeck::{Freshness, StatusSnapshot};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Status panel widget
pub struct StatusPanel {
    snapshot: StatusSnapshot,
    title: String,
}

impl StatusPanel {
    /// Create new status panel
    pub fn new() -> Self {
        Self {
            snapshot: StatusSnapshot::default(),
            title: "Process Control".to_string(),
        }
    }

    /// Replace the displayed snapshot wholesale
    pub fn update(&mut self, snapshot: StatusSnapshot) {
        self.snapshot = snapshot;
    }

    /// Get current snapshot
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    fn toggle_line(name: &str, running: bool, key: char) -> Line<'static> {
        let indicator = if running {
            StateIndicator::new(StateType::Running, format!("{}: running", name))
        } else {
            StateIndicator::new(StateType::Stopped, format!("{}: stopped", name))
        };
        Line::from(vec![
            indicator.render(),
            Span::styled(
                format!("  [{}]", key),
                Style::default().fg(DashboardColors::SECONDARY),
            ),
        ])
    }

    /// Displayed lines, in order
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Self::toggle_line("Poll articles", self.snapshot.status.is_polling, 'p'),
            Self::toggle_line("Classify articles", self.snapshot.status.is_classifying, 'c'),
            Line::from(vec![
                Span::styled("⊘ Reset classifications", Style::default().fg(DashboardColors::ERROR)),
                Span::styled("  [r]", Style::default().fg(DashboardColors::SECONDARY)),
            ]),
        ];

        lines.push(match self.snapshot.freshness {
            Freshness::Live => StateIndicator::new(StateType::Live, "Status: live").render().into(),
            Freshness::Stale => StateIndicator::new(StateType::Stale, "Status: stale (last known)")
                .render()
                .into(),
        });

        if let Some(error) = &self.snapshot.last_error {
            lines.push(Line::from(Span::styled(
                format!("last error: {}", error),
                Style::default().fg(DashboardColors::ERROR),
            )));
        }

        lines
    }

    /// Render the status panel
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self.lines().into_iter().map(ListItem::new).collect();
        let list = List::new(items).block(
            Block::default()
                .title(self.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DashboardColors::BORDER)),
        );
        frame.render_widget(list, area);
    }
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self::new()
    }
}
