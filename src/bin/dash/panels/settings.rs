//! Settings panel - Dismissible configuration drawer
//!
//! Rendered as an overlay on the right edge while the settings session is
//! open. The panel owns only focus and key routing; form state lives in
//! the session so edits are discarded with it on cancel.

use crate::colors::DashboardColors;
use crossterm::event::KeyCode;
use newsdeck::{SettingsForm, SettingsSession};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    LlmUrl,
    LlmApiKey,
    FinnhubApiKey,
    Weight,
}

impl FocusField {
    fn next(self) -> Self {
        match self {
            FocusField::LlmUrl => FocusField::LlmApiKey,
            FocusField::LlmApiKey => FocusField::FinnhubApiKey,
            FocusField::FinnhubApiKey => FocusField::Weight,
            FocusField::Weight => FocusField::LlmUrl,
        }
    }

    fn prev(self) -> Self {
        match self {
            FocusField::LlmUrl => FocusField::Weight,
            FocusField::LlmApiKey => FocusField::LlmUrl,
            FocusField::FinnhubApiKey => FocusField::LlmApiKey,
            FocusField::Weight => FocusField::FinnhubApiKey,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FocusField::LlmUrl => "LLM URL",
            FocusField::LlmApiKey => "LLM API Key",
            FocusField::FinnhubApiKey => "FinnHub API Key",
            FocusField::Weight => "Router quality/cost weight",
        }
    }
}

/// Settings drawer widget
pub struct SettingsPanel {
    focus: FocusField,
}

impl SettingsPanel {
    /// Create new settings panel
    pub fn new() -> Self {
        Self {
            focus: FocusField::LlmUrl,
        }
    }

    /// Currently focused field
    pub fn focus(&self) -> FocusField {
        self.focus
    }

    /// Reset focus for a fresh open
    pub fn reset_focus(&mut self) {
        self.focus = FocusField::LlmUrl;
    }

    /// Route an editing key into the form. Returns true if the key was
    /// consumed. Save/cancel keys are handled by the caller, which owns
    /// the session transitions.
    pub fn handle_key(&mut self, key: KeyCode, form: &mut SettingsForm) -> bool {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                true
            }
            KeyCode::Left if self.focus == FocusField::Weight => {
                form.step_weight(-1);
                true
            }
            KeyCode::Right if self.focus == FocusField::Weight => {
                form.step_weight(1);
                true
            }
            KeyCode::Char(c) => match self.focus {
                FocusField::LlmUrl => {
                    form.llm_url.push(c);
                    true
                }
                FocusField::LlmApiKey => {
                    form.llm_api_key.push(c);
                    true
                }
                FocusField::FinnhubApiKey => {
                    form.finnhub_api_key.push(c);
                    true
                }
                FocusField::Weight => false,
            },
            KeyCode::Backspace => match self.focus {
                FocusField::LlmUrl => {
                    form.llm_url.pop();
                    true
                }
                FocusField::LlmApiKey => {
                    form.llm_api_key.pop();
                    true
                }
                FocusField::FinnhubApiKey => {
                    form.finnhub_api_key.pop();
                    true
                }
                FocusField::Weight => false,
            },
            _ => false,
        }
    }

    fn field_line(&self, field: FocusField, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(DashboardColors::FOCUS)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DashboardColors::IDLE)
        };
        Line::from(vec![
            Span::styled(format!("{}{}: ", marker, field.label()), label_style),
            Span::raw(value),
        ])
    }

    fn weight_bar(weight: f64) -> String {
        let filled = ((weight * 20.0).round() as usize).min(20);
        format!("{}{} {:.2}", "█".repeat(filled), "░".repeat(20 - filled), weight)
    }

    /// Render the drawer over `area` (caller computes the overlay rect)
    pub fn render(&self, frame: &mut Frame, area: Rect, session: &SettingsSession) {
        let Some(form) = session.form() else {
            return;
        };

        let mut items: Vec<ListItem> = vec![
            ListItem::new(self.field_line(FocusField::LlmUrl, form.llm_url.clone())),
            ListItem::new(self.field_line(FocusField::LlmApiKey, form.llm_api_key.display())),
            ListItem::new(self.field_line(
                FocusField::FinnhubApiKey,
                form.finnhub_api_key.display(),
            )),
            ListItem::new(self.field_line(FocusField::Weight, Self::weight_bar(form.weight()))),
            ListItem::new(Line::from(Span::styled(
                "  Enter save | Esc cancel | Tab next field",
                Style::default().fg(DashboardColors::SECONDARY),
            ))),
        ];

        if let Some(error) = session.last_error() {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(DashboardColors::ERROR),
            ))));
        }

        frame.render_widget(Clear, area);
        let list = List::new(items).block(
            Block::default()
                .title("Settings")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DashboardColors::FOCUS)),
        );
        frame.render_widget(list, area);
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}
