use ratatui::{
  layout::{Alignment, Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span, Text},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use serde::{Deserialize, Serialize};

use super::format::pluralize;
use crate::{navigation::Scope, tui::Frame};

/// What a delete confirmation is about. The update count is captured when the dialog opens and never
/// follows later refreshes of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTarget {
  pub branch: String,
  pub runtime_version: String,
  pub update_count: u64,
}

impl DeleteTarget {
  /// The listing that has to be invalidated once the target is gone.
  pub fn scope(&self) -> Scope {
    Scope::runtime_versions(self.branch.clone())
  }

  pub fn prompt(&self) -> String {
    format!(
      "Are you sure you want to delete all {} for runtime version {}? This action cannot be undone.",
      pluralize(self.update_count, "update"),
      self.runtime_version
    )
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
  #[default]
  Cancel,
  Delete,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum DeleteDialog {
  #[default]
  Closed,
  Confirming {
    target: DeleteTarget,
    focus: DialogButton,
  },
  Pending {
    target: DeleteTarget,
  },
}

impl DeleteDialog {
  pub fn open(&mut self, target: DeleteTarget) -> bool {
    if !matches!(self, DeleteDialog::Closed) {
      return false;
    }
    *self = DeleteDialog::Confirming { target, focus: DialogButton::default() };
    true
  }

  /// Closes without side effects. Not allowed while the delete is in flight.
  pub fn cancel(&mut self) -> bool {
    if !matches!(self, DeleteDialog::Confirming { .. }) {
      return false;
    }
    *self = DeleteDialog::Closed;
    true
  }

  /// Moves to pending and hands back the target to delete. Returns None unless confirming, so at most one
  /// delete is ever in flight.
  pub fn confirm(&mut self) -> Option<DeleteTarget> {
    let DeleteDialog::Confirming { target, .. } = self else {
      return None;
    };
    let target = target.clone();
    *self = DeleteDialog::Pending { target: target.clone() };
    Some(target)
  }

  pub fn resolve_success(&mut self, resolved: &DeleteTarget) -> bool {
    match self {
      DeleteDialog::Pending { target } if *target == *resolved => {
        *self = DeleteDialog::Closed;
        true
      },
      _ => false,
    }
  }

  /// Back to confirming with the controls enabled again, so the delete can be retried or cancelled.
  pub fn resolve_failure(&mut self, resolved: &DeleteTarget) -> bool {
    match self {
      DeleteDialog::Pending { target } if *target == *resolved => {
        *self = DeleteDialog::Confirming { target: resolved.clone(), focus: DialogButton::Delete };
        true
      },
      _ => false,
    }
  }

  pub fn toggle_focus(&mut self) {
    if let DeleteDialog::Confirming { focus, .. } = self {
      *focus = match focus {
        DialogButton::Cancel => DialogButton::Delete,
        DialogButton::Delete => DialogButton::Cancel,
      };
    }
  }

  pub fn focus(&self) -> Option<DialogButton> {
    match self {
      DeleteDialog::Confirming { focus, .. } => Some(*focus),
      _ => None,
    }
  }

  pub fn target(&self) -> Option<&DeleteTarget> {
    match self {
      DeleteDialog::Closed => None,
      DeleteDialog::Confirming { target, .. } | DeleteDialog::Pending { target } => Some(target),
    }
  }

  pub fn is_open(&self) -> bool {
    !matches!(self, DeleteDialog::Closed)
  }

  pub fn is_pending(&self) -> bool {
    matches!(self, DeleteDialog::Pending { .. })
  }

  /// Whether the confirm and cancel controls react to input.
  pub fn controls_enabled(&self) -> bool {
    matches!(self, DeleteDialog::Confirming { .. })
  }

  pub fn button_labels(&self) -> (&'static str, &'static str) {
    if self.is_pending() { ("Cancel", "Deleting...") } else { ("Cancel", "Delete") }
  }

  pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
    let Some(target) = self.target() else {
      return;
    };

    let popup = centered_rect(area, 60, 9);
    let (cancel_label, delete_label) = self.button_labels();
    let button_style = |button: DialogButton| {
      if !self.controls_enabled() {
        Style::default().fg(Color::DarkGray)
      } else if self.focus() == Some(button) {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
      } else {
        Style::default()
      }
    };
    let delete_style = match button_style(DialogButton::Delete) {
      style if self.controls_enabled() => style.fg(Color::Red),
      style => style,
    };

    let text = Text::from(vec![
      Line::from(target.prompt()),
      Line::default(),
      Line::from(vec![
        Span::styled(format!("[ {cancel_label} ]"), button_style(DialogButton::Cancel)),
        Span::raw("  "),
        Span::styled(format!("[ {delete_label} ]"), delete_style),
      ])
      .alignment(Alignment::Right),
    ]);

    let block =
      Block::default().title("Delete Runtime Version").borders(Borders::ALL).style(Style::default().fg(Color::White));
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
  }
}

fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
  let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
  let [area] = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center).areas(area);
  area
}
