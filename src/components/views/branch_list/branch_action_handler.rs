use crossterm::event::KeyEvent;
use ratatui::{
  layout::Constraint,
  style::{Modifier, Style},
  text::{Line, Span},
};

use crate::{
  action::Action,
  api::Branch,
  components::{shared::table::Column, traits::list_action_handler::ListActionHandler},
  navigation::{Scope, ScopeChange},
};

#[derive(Default)]
pub struct BranchActionHandler;

fn branch_name(branch: &Branch) -> Line<'static> {
  let mut parts = vec![Span::raw(branch.name.clone())];
  if let Some(channel) = &branch.release_channel {
    parts.push(Span::styled(format!(" [{channel}]"), Style::default().add_modifier(Modifier::DIM)));
  }
  Line::from(parts)
}

impl ListActionHandler<Branch> for BranchActionHandler {
  fn title(&self) -> &'static str {
    "Branches"
  }

  fn columns(&self) -> Vec<Column<Branch>> {
    vec![Column::new("Name", Constraint::Fill(1), |branch: &Branch| branch.name.clone()).with_formatter(branch_name)]
  }

  fn drill_down(&self, scope: &Scope, item: &Branch) -> Option<Scope> {
    Some(scope.apply(ScopeChange::SelectBranch(item.name.clone())))
  }

  fn handle_key_event(&self, _key: KeyEvent, _selected_item: Option<&Branch>) -> Option<Action> {
    None
  }

  fn get_instructions(&self, selected_item: Option<&Branch>) -> Vec<&'static str> {
    let mut instructions = vec!["q: Quit"];
    if selected_item.is_some() {
      instructions.push("enter: Open");
    }
    instructions.push("r: Refresh");
    instructions
  }
}
