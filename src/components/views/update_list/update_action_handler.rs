use crossterm::event::KeyEvent;
use ratatui::{
  layout::Constraint,
  text::{Line, Span},
};

use crate::{
  action::Action,
  api::Update,
  components::{
    shared::{
      format::{BadgeVariant, badge, format_timestamp, platform_icon, short_commit_hash},
      table::Column,
    },
    traits::list_action_handler::ListActionHandler,
  },
};

#[derive(Default)]
pub struct UpdateActionHandler;

fn platform(update: &Update) -> Line<'static> {
  match platform_icon(&update.platform) {
    Some(icon) => Line::from(vec![Span::raw(icon), Span::raw(" "), Span::raw(update.platform.to_string())]),
    None => Line::from(update.platform.to_string()),
  }
}

fn commit(update: &Update) -> Line<'static> {
  Line::from(badge(short_commit_hash(&update.commit_hash), BadgeVariant::Secondary))
}

fn published_at(update: &Update) -> Line<'static> {
  Line::from(badge(format_timestamp(&update.created_at), BadgeVariant::Outline))
}

impl ListActionHandler<Update> for UpdateActionHandler {
  fn title(&self) -> &'static str {
    "Updates"
  }

  fn columns(&self) -> Vec<Column<Update>> {
    vec![
      // Ids are millisecond timestamps, 13 digits wide.
      Column::new("ID", Constraint::Length(13), |update: &Update| update.update_id.clone()),
      Column::new("UUID", Constraint::Length(38), |update: &Update| update.update_uuid.clone()),
      Column::new("Platform", Constraint::Length(12), |update: &Update| update.platform.to_string())
        .with_formatter(platform),
      Column::new("Commit", Constraint::Length(10), |update: &Update| update.commit_hash.clone())
        .with_formatter(commit),
      Column::new("Published at", Constraint::Fill(1), |update: &Update| format_timestamp(&update.created_at))
        .with_formatter(published_at),
    ]
  }

  fn handle_key_event(&self, _key: KeyEvent, _selected_item: Option<&Update>) -> Option<Action> {
    None
  }

  fn get_instructions(&self, _selected_item: Option<&Update>) -> Vec<&'static str> {
    vec!["esc: Back", "r: Refresh", "q: Quit"]
  }
}
