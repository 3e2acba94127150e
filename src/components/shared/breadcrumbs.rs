use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{navigation::Scope, tui::Frame};

const SEPARATOR: &str = " › ";

/// Ancestors are underlined like links, the current scope is bold.
pub fn breadcrumb_line(scope: &Scope) -> Line<'static> {
  let crumbs = scope.breadcrumbs();
  let last = crumbs.len().saturating_sub(1);
  let mut spans = Vec::with_capacity(crumbs.len() * 2);
  for (index, crumb) in crumbs.into_iter().enumerate() {
    if index > 0 {
      spans.push(Span::styled(SEPARATOR, Style::default().add_modifier(Modifier::DIM)));
    }
    let style = if index == last {
      Style::default().add_modifier(Modifier::BOLD)
    } else {
      Style::default().add_modifier(Modifier::UNDERLINED)
    };
    spans.push(Span::styled(crumb.label, style));
  }
  Line::from(spans)
}

#[derive(Default)]
pub struct Breadcrumbs {}

impl Breadcrumbs {
  /// Renders the trail with the shareable location as the block title.
  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, scope: &Scope) {
    let paragraph = Paragraph::new(breadcrumb_line(scope))
      .block(Block::default().borders(Borders::ALL).title(scope.to_string()))
      .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}
