//! Articles panel - Recent articles with classification results
//!
//! Read-only view over `GET /articles`; the filter cycles through
//! all/classified/unclassified.

use crate::colors::DashboardColors;
use newsdeck::{ArticleFilter, ArticleSummary};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Articles panel widget
pub struct ArticlesPanel {
    articles: Vec<ArticleSummary>,
    filter: ArticleFilter,
    unclassified_count: u64,
}

impl ArticlesPanel {
    /// Create new articles panel
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            filter: ArticleFilter::All,
            unclassified_count: 0,
        }
    }

    /// Replace the article list
    pub fn update(&mut self, articles: Vec<ArticleSummary>) {
        self.articles = articles;
    }

    /// Update the backlog count
    pub fn update_backlog(&mut self, unclassified_count: u64) {
        self.unclassified_count = unclassified_count;
    }

    /// Advance the classification filter; the caller re-fetches with the
    /// new value
    pub fn cycle_filter(&mut self) -> ArticleFilter {
        self.filter = self.filter.next();
        self.filter
    }

    /// Current filter
    pub fn filter(&self) -> ArticleFilter {
        self.filter
    }

    /// Number of listed articles
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    fn sentiment_color(sentiment: &str) -> Color {
        match sentiment {
            "positive" | "bullish" => DashboardColors::SUCCESS,
            "negative" | "bearish" => DashboardColors::ERROR,
            _ => DashboardColors::IDLE,
        }
    }

    fn article_item(article: &ArticleSummary) -> ListItem<'static> {
        let mut spans = vec![
            Span::styled(
                article.date.clone(),
                Style::default().fg(DashboardColors::SECONDARY),
            ),
            Span::raw("  "),
            Span::raw(article.title.clone()),
        ];

        if let Some(sentiment) = &article.sentiment {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("[{}]", sentiment),
                Style::default()
                    .fg(Self::sentiment_color(sentiment))
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(category) = &article.industry_category {
            spans.push(Span::styled(
                format!(" {}", category),
                Style::default().fg(DashboardColors::FOCUS),
            ));
        }

        ListItem::new(Line::from(spans))
    }

    /// Render the articles panel
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Articles ({}) - unclassified backlog: {}  [f]",
            self.filter.label(),
            self.unclassified_count
        );

        let items: Vec<ListItem> = if self.articles.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "  (no articles)",
                Style::default()
                    .fg(DashboardColors::SECONDARY)
                    .add_modifier(Modifier::ITALIC),
            )))]
        } else {
            // newest first; clip to what fits
            let visible = area.height.saturating_sub(2) as usize;
            self.articles
                .iter()
                .take(visible.max(1))
                .map(Self::article_item)
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DashboardColors::BORDER)),
        );
        frame.render_widget(list, area);
    }
}

impl Default for ArticlesPanel {
    fn default() -> Self {
        Self::new()
    }
}
