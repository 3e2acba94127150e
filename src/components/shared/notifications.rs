use std::collections::VecDeque;

use ratatui::{
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span, Text},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use serde::{Deserialize, Serialize};

use crate::tui::Frame;

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
  Info,
  Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub title: String,
  pub description: String,
  pub level: NotificationLevel,
}

impl Notification {
  pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
    Notification { title: title.into(), description: description.into(), level: NotificationLevel::Info }
  }

  pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
    Notification { title: title.into(), description: description.into(), level: NotificationLevel::Destructive }
  }
}

/// Transient toasts in the top right corner. Each one disappears after a fixed number of ticks.
#[derive(Debug)]
pub struct NotificationTray {
  entries: VecDeque<(Notification, u16)>,
  ttl_ticks: u16,
}

impl NotificationTray {
  pub fn new(ttl_ticks: u16) -> Self {
    NotificationTray { entries: VecDeque::new(), ttl_ticks: ttl_ticks.max(1) }
  }

  pub fn push(&mut self, notification: Notification) {
    self.entries.push_front((notification, self.ttl_ticks));
  }

  /// Returns true when a toast expired and the screen needs a redraw.
  pub fn tick(&mut self) -> bool {
    let before = self.entries.len();
    for (_, remaining) in self.entries.iter_mut() {
      *remaining = remaining.saturating_sub(1);
    }
    self.entries.retain(|(_, remaining)| *remaining > 0);
    before != self.entries.len()
  }

  pub fn visible(&self) -> impl Iterator<Item = &Notification> {
    self.entries.iter().take(MAX_VISIBLE).map(|(notification, _)| notification)
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
    let mut top = area.y;
    for notification in self.visible() {
      if top + TOAST_HEIGHT > area.bottom() {
        break;
      }
      let [column] = Layout::horizontal([Constraint::Length(TOAST_WIDTH)]).flex(Flex::End).areas(area);
      let toast = Rect { y: top, height: TOAST_HEIGHT, ..column };

      let color = match notification.level {
        NotificationLevel::Info => Color::Green,
        NotificationLevel::Destructive => Color::Red,
      };
      let text = Text::from(vec![
        Line::from(Span::styled(notification.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(notification.description.clone()),
      ]);
      let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).style(Style::default().fg(color)));

      frame.render_widget(Clear, toast);
      frame.render_widget(paragraph, toast);
      top += TOAST_HEIGHT;
    }
  }
}
