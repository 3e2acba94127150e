use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Constraint, text::Line};

use crate::{
  action::Action,
  api::RuntimeVersion,
  components::{
    shared::{
      delete_dialog::DeleteTarget,
      format::{BadgeVariant, badge, format_timestamp},
      table::Column,
    },
    traits::list_action_handler::ListActionHandler,
  },
  navigation::{Scope, ScopeChange},
};

#[derive(Default)]
pub struct RuntimeVersionActionHandler;

fn created_at(rv: &RuntimeVersion) -> Line<'static> {
  Line::from(badge(format_timestamp(&rv.created_at), BadgeVariant::Outline))
}

fn last_updated_at(rv: &RuntimeVersion) -> Line<'static> {
  Line::from(badge(format_timestamp(&rv.last_updated_at), BadgeVariant::Outline))
}

fn number_of_updates(rv: &RuntimeVersion) -> Line<'static> {
  Line::from(badge(rv.number_of_updates, BadgeVariant::Secondary))
}

impl ListActionHandler<RuntimeVersion> for RuntimeVersionActionHandler {
  fn title(&self) -> &'static str {
    "Runtime versions"
  }

  fn columns(&self) -> Vec<Column<RuntimeVersion>> {
    vec![
      Column::new("Runtime version", Constraint::Fill(1), |rv: &RuntimeVersion| rv.runtime_version.clone()),
      Column::new("Created at", Constraint::Length(30), |rv: &RuntimeVersion| format_timestamp(&rv.created_at))
        .with_formatter(created_at),
      Column::new("Last update", Constraint::Length(30), |rv: &RuntimeVersion| format_timestamp(&rv.last_updated_at))
        .with_formatter(last_updated_at),
      Column::new("# Updates", Constraint::Length(10), |rv: &RuntimeVersion| rv.number_of_updates.to_string())
        .with_formatter(number_of_updates),
    ]
  }

  fn drill_down(&self, scope: &Scope, item: &RuntimeVersion) -> Option<Scope> {
    Some(scope.apply(ScopeChange::SelectRuntimeVersion(item.runtime_version.clone())))
  }

  fn delete_target(&self, scope: &Scope, item: &RuntimeVersion) -> Option<DeleteTarget> {
    scope.branch().map(|branch| DeleteTarget {
      branch: branch.to_string(),
      runtime_version: item.runtime_version.clone(),
      update_count: item.number_of_updates,
    })
  }

  fn handle_key_event(&self, key: KeyEvent, selected_item: Option<&RuntimeVersion>) -> Option<Action> {
    match key {
      KeyEvent { code: KeyCode::Char('d') | KeyCode::Delete, modifiers: KeyModifiers::NONE, .. } => {
        selected_item.map(|_| Action::RequestDelete)
      },
      _ => None,
    }
  }

  fn get_instructions(&self, selected_item: Option<&RuntimeVersion>) -> Vec<&'static str> {
    let mut instructions = vec!["esc: Back"];
    if selected_item.is_some() {
      instructions.push("enter: View Updates");
      instructions.push("d: Delete Updates");
    }
    instructions.push("r: Refresh");
    instructions.push("q: Quit");
    instructions
  }
}
