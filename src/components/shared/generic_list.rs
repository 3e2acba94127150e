use std::{
  fmt::Debug,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  time::SystemTime,
};

use async_trait::async_trait;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Constraint, Layout, Rect},
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph, TableState, Wrap},
};
use tokio::{
  sync::mpsc::UnboundedSender,
  task::{JoinHandle, spawn},
};
use tracing::{debug, error, info, warn};

use super::{
  delete_dialog::{DeleteDialog, DeleteTarget, DialogButton},
  instruction_footer::{FooterMode, InstructionFooter},
  notifications::Notification,
  scope_cache::{FetchStatus, ScopeCache, ScopeView},
  table::TableModel,
};
use crate::{
  action::Action,
  api::{DeleteResult, OtaApi},
  components::{
    AsyncComponent, Component,
    traits::{list_action_handler::ListActionHandler, list_data_source::ListDataSource, managed_item::ManagedItem},
  },
  navigation::{Scope, ScopeChange},
  tui::Frame,
};

const DELETE_FAILED_FALLBACK: &str = "Failed to delete runtime version";

fn lock<C>(cache: &Mutex<C>) -> MutexGuard<'_, C> {
  cache.lock().unwrap_or_else(PoisonError::into_inner)
}

// --- Generic List Component ---

/// A table of records for one scope at a time. Fetches go through a per-scope cache owned by this
/// component, and a delete confirmation dialog guards the only mutation.
pub struct GenericListComponent<T, DS, AH>
where
  T: ManagedItem + Debug,
  DS: ListDataSource<T>,
  AH: ListActionHandler<T>,
{
  api: Arc<dyn OtaApi>,
  data_source: Arc<DS>,
  action_handler: Arc<AH>,

  // State
  scope: Scope,
  cache: Arc<Mutex<ScopeCache<T>>>,
  selected_index: usize,
  selected_key: Option<String>,
  table_state: TableState,
  delete_dialog: DeleteDialog,

  // Sub-components
  instruction_footer: InstructionFooter,

  // Communication
  action_tx: Option<UnboundedSender<Action>>,
}

impl<T, DS, AH> GenericListComponent<T, DS, AH>
where
  T: ManagedItem + Debug,
  DS: ListDataSource<T> + Default,
  AH: ListActionHandler<T> + Default,
{
  pub fn new(api: Arc<dyn OtaApi>) -> Self {
    Self {
      api,
      data_source: Arc::new(DS::default()),
      action_handler: Arc::new(AH::default()),
      scope: Scope::default(),
      cache: Arc::new(Mutex::new(ScopeCache::new())),
      selected_index: 0,
      selected_key: None,
      table_state: TableState::default(),
      delete_dialog: DeleteDialog::default(),
      instruction_footer: InstructionFooter::default(),
      action_tx: None,
    }
  }

  pub fn scope(&self) -> &Scope {
    &self.scope
  }

  pub fn accepts(&self, scope: &Scope) -> bool {
    self.data_source.accepts(scope)
  }

  pub fn delete_dialog(&self) -> &DeleteDialog {
    &self.delete_dialog
  }

  fn send_action(&self, action: Action) {
    if let Some(tx) = &self.action_tx {
      if let Err(e) = tx.send(action) {
        error!("Failed to send action: {}", e);
      }
    }
  }

  // --- State Management ---

  pub fn view(&self) -> ScopeView<T> {
    self.view_of(&self.scope)
  }

  pub fn view_of(&self, scope: &Scope) -> ScopeView<T> {
    lock(&self.cache).view(scope)
  }

  pub fn table_model(&self) -> TableModel {
    let view = self.view();
    TableModel::build(&self.action_handler.columns(), &view.records, view.is_loading())
  }

  pub fn selected_item(&self) -> Option<T> {
    self.view().records.get(self.selected_index).cloned()
  }

  fn select(&mut self, index: usize) {
    self.selected_index = index;
    self.selected_key = self.selected_item().map(|item| item.key().to_string());
  }

  fn select_next(&mut self) {
    let count = self.view().records.len();
    if count == 0 {
      return;
    }
    let next_index = if self.selected_index >= count - 1 { 0 } else { self.selected_index + 1 };
    self.select(next_index);
  }

  fn select_previous(&mut self) {
    let count = self.view().records.len();
    if count == 0 {
      return;
    }
    let prev_index = if self.selected_index == 0 { count - 1 } else { self.selected_index - 1 };
    self.select(prev_index);
  }

  /// Keeps the cursor on the same record when fresh data arrives, clamping when that record is gone.
  fn restore_selection(&mut self) {
    let records = self.view().records;
    let index = self
      .selected_key
      .as_deref()
      .and_then(|key| records.iter().position(|record| record.key() == key))
      .unwrap_or_else(|| self.selected_index.min(records.len().saturating_sub(1)));
    self.select(index);
  }

  // --- Async Operations ---

  /// Shows another scope and fetches it. Returns None when the scope is listed by another component.
  pub fn set_scope(&mut self, scope: Scope) -> Option<JoinHandle<()>> {
    if !self.accepts(&scope) {
      return None;
    }
    if scope != self.scope {
      info!("Showing {} at {}", self.action_handler.title(), scope);
      self.scope = scope;
      self.selected_index = 0;
      self.selected_key = None;
    }
    Some(self.load_items())
  }

  /// Fetches the current scope. Cached records stay visible until the result is committed, and a result
  /// is dropped when a newer fetch of the same scope was started in the meantime.
  pub fn load_items(&mut self) -> JoinHandle<()> {
    let ticket = lock(&self.cache).begin(&self.scope);
    self.send_action(Action::Render);
    let tx = self.action_tx.clone();
    let ds = self.data_source.clone();
    let api = self.api.clone();
    let cache = self.cache.clone();

    spawn(async move {
      let scope = ticket.scope.clone();
      let result = ds.fetch_items(api, &scope).await.map_err(|err| {
        error!("Failed to fetch items for {}: {}", scope, err);
        err.to_string()
      });
      if !lock(&cache).commit(ticket, result) {
        debug!("Discarded superseded result for {}", scope);
        return;
      }
      if let Some(tx) = tx {
        let _ = tx.send(Action::ItemsLoaded(scope));
      }
    })
  }

  /// Opens the confirmation for the selected record, freezing what it shows at this moment.
  pub fn request_delete(&mut self) -> bool {
    let Some(item) = self.selected_item() else {
      return false;
    };
    let Some(target) = self.action_handler.delete_target(&self.scope, &item) else {
      return false;
    };
    self.delete_dialog.open(target)
  }

  /// Starts the delete of the confirmed target. At most one runs at a time because the dialog only
  /// hands out a target while it is confirming.
  pub fn confirm_delete(&mut self) -> Option<JoinHandle<()>> {
    let target = self.delete_dialog.confirm()?;
    info!("Deleting runtime version {} of branch {}", target.runtime_version, target.branch);
    let api = self.api.clone();
    let tx = self.action_tx.clone();

    Some(spawn(async move {
      let action = match api.delete_runtime_version(&target.branch, &target.runtime_version).await {
        Ok(result) => Action::DeleteSucceeded { target, result },
        Err(err) => {
          error!("Failed to delete runtime version {}: {}", target.runtime_version, err);
          Action::DeleteFailed { message: err.to_string(), target }
        },
      };
      if let Some(tx) = tx {
        let _ = tx.send(action);
      }
    }))
  }

  fn delete_succeeded(&mut self, target: DeleteTarget, result: DeleteResult) -> Option<Action> {
    if !self.delete_dialog.resolve_success(&target) {
      return None;
    }
    let scope = target.scope();
    lock(&self.cache).invalidate(&scope);
    self.send_action(Action::Notify(Notification::info(
      "Runtime version deleted",
      format!("Successfully deleted {} of {} updates.", result.deleted_count, result.total_count),
    )));
    if self.scope == scope {
      self.load_items();
    }
    Some(Action::EndConfirmMode)
  }

  fn delete_failed(&mut self, target: DeleteTarget, message: String) -> Option<Action> {
    if !self.delete_dialog.resolve_failure(&target) {
      return None;
    }
    let description = if message.trim().is_empty() { DELETE_FAILED_FALLBACK.to_string() } else { message };
    Some(Action::Notify(Notification::destructive("Delete failed", description)))
  }

  // --- Input ---

  fn handle_dialog_key(&self, key: KeyEvent) -> Option<Action> {
    if !self.delete_dialog.controls_enabled() {
      return None;
    }
    match key.code {
      KeyCode::Char('y') => Some(Action::ConfirmDelete),
      KeyCode::Char('n') | KeyCode::Esc => Some(Action::CancelDelete),
      KeyCode::Enter => match self.delete_dialog.focus() {
        Some(DialogButton::Delete) => Some(Action::ConfirmDelete),
        _ => Some(Action::CancelDelete),
      },
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => Some(Action::ToggleDialogFocus),
      _ => None,
    }
  }

  fn handle_list_key(&self, key: KeyEvent) -> Option<Action> {
    match key.code {
      KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
      KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(Action::OpenSelected),
      KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') | KeyCode::Esc => Some(Action::GoUp),
      KeyCode::Home | KeyCode::Char('g') => Some(Action::GoHome),
      KeyCode::Char('r') => Some(Action::Refresh),
      _ => {
        let selected = self.selected_item();
        self.action_handler.handle_key_event(key, selected.as_ref())
      },
    }
  }

  fn footer_mode(&self) -> FooterMode {
    if self.delete_dialog.is_pending() {
      FooterMode::Deleting
    } else if self.delete_dialog.is_open() {
      FooterMode::Confirming
    } else {
      FooterMode::Browsing
    }
  }

  // --- Rendering ---

  fn render_title(&self, view: &ScopeView<T>) -> String {
    let title = self.action_handler.title();
    match view.status {
      FetchStatus::Loading(time) if view.is_loading() => {
        format!("{} - Loading... ({})", title, format_time_elapsed(time))
      },
      FetchStatus::Loading(time) => format!("{} - Refreshing... ({})", title, format_time_elapsed(time)),
      FetchStatus::Idle => title.to_string(),
      FetchStatus::Success | FetchStatus::Error => format!("{} ({})", title, view.records.len()),
    }
  }

  fn render_error(&self, frame: &mut Frame<'_>, area: Rect, message: &str) {
    let text = format!("Failed to load {}: {}", self.action_handler.title().to_lowercase(), message);
    let paragraph = Paragraph::new(text)
      .wrap(Wrap { trim: true })
      .block(Block::default().title("Error").borders(Borders::ALL))
      .style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, area);
  }

  fn render_table(&mut self, frame: &mut Frame<'_>, area: Rect, view: &ScopeView<T>) {
    let model = TableModel::build(&self.action_handler.columns(), &view.records, view.is_loading());
    let block = Block::default().title(self.render_title(view)).borders(Borders::ALL);

    let row_count = model.row_count();
    if row_count == 0 {
      self.table_state.select(None);
    } else {
      self.table_state.select(Some(self.selected_index.min(row_count - 1)));
    }

    frame.render_stateful_widget(model.to_widget(block), area, &mut self.table_state);
  }
}

// --- Component Implementations ---

impl<T, DS, AH> Component for GenericListComponent<T, DS, AH>
where
  T: ManagedItem + Debug,
  DS: ListDataSource<T> + Default,
  AH: ListActionHandler<T> + Default,
{
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    self.action_tx = Some(tx);
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
    let view = self.view();

    let [banner, table, footer] = match view.error {
      Some(_) => Layout::vertical([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)]).areas(area),
      None => Layout::vertical([Constraint::Length(0), Constraint::Min(1), Constraint::Length(3)]).areas(area),
    };

    if let Some(message) = &view.error {
      self.render_error(frame, banner, message);
    }
    self.render_table(frame, table, &view);
    let selected = self.selected_item();
    let instructions = self.action_handler.get_instructions(selected.as_ref());
    self.instruction_footer.render(frame, footer, self.footer_mode(), instructions);
    self.delete_dialog.render(frame, area);

    Ok(())
  }
}

#[async_trait]
impl<T, DS, AH> AsyncComponent for GenericListComponent<T, DS, AH>
where
  T: ManagedItem + Debug,
  DS: ListDataSource<T> + Default,
  AH: ListActionHandler<T> + Default,
{
  async fn handle_events(&mut self, event: Option<crate::tui::Event>) -> Result<Option<Action>> {
    match event {
      Some(crate::tui::Event::Key(key)) => {
        if self.delete_dialog.is_open() {
          Ok(self.handle_dialog_key(key))
        } else {
          Ok(self.handle_list_key(key))
        }
      },
      _ => Ok(None),
    }
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      // --- Loading/State ---
      Action::Navigate(scope) => {
        self.set_scope(scope);
        Ok(None)
      },
      Action::Refresh => {
        self.load_items();
        Ok(None)
      },
      Action::ItemsLoaded(scope) if scope == self.scope => {
        self.restore_selection();
        Ok(Some(Action::Render))
      },

      // --- Navigation ---
      Action::SelectNext => {
        self.select_next();
        Ok(Some(Action::Render))
      },
      Action::SelectPrevious => {
        self.select_previous();
        Ok(Some(Action::Render))
      },
      Action::OpenSelected => {
        let next = self.selected_item().and_then(|item| self.action_handler.drill_down(&self.scope, &item));
        Ok(next.map(Action::Navigate))
      },
      Action::GoUp => Ok(self.scope.parent().map(Action::Navigate)),
      Action::GoHome if !self.scope.is_root() => Ok(Some(Action::Navigate(self.scope.apply(ScopeChange::Root)))),

      // --- Delete ---
      Action::RequestDelete => {
        if self.request_delete() {
          Ok(Some(Action::StartConfirmMode))
        } else {
          Ok(None)
        }
      },
      Action::ToggleDialogFocus => {
        self.delete_dialog.toggle_focus();
        Ok(Some(Action::Render))
      },
      Action::CancelDelete => {
        if self.delete_dialog.cancel() {
          Ok(Some(Action::EndConfirmMode))
        } else {
          Ok(None)
        }
      },
      Action::ConfirmDelete => {
        if self.confirm_delete().is_none() {
          warn!("Ignored delete confirmation while no delete was being confirmed");
        }
        Ok(Some(Action::Render))
      },
      Action::DeleteSucceeded { target, result } => Ok(self.delete_succeeded(target, result)),
      Action::DeleteFailed { target, message } => Ok(self.delete_failed(target, message)),

      // --- Default ---
      _ => Ok(None),
    }
  }
}

fn format_time_elapsed(time: SystemTime) -> String {
  match time.elapsed() {
    Ok(elapsed) => format!("{:.1}s", elapsed.as_secs_f64()),
    Err(err) => {
      warn!("Failed to get system time {}", err);
      String::from("xs")
    },
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use crossterm::event::KeyModifiers;
  use pretty_assertions::assert_eq;
  use ratatui::{Terminal, backend::TestBackend};
  use tokio::sync::{
    Notify,
    mpsc::{UnboundedReceiver, unbounded_channel},
  };

  use super::*;
  use crate::{
    api::{
      Branch, RuntimeVersion, Update,
      mock_api::{MockOtaApi, update},
    },
    components::{
      shared::table::TableBody,
      views::{RuntimeVersionListComponent, UpdateListComponent},
    },
    error::Error,
    tui::Event,
  };

  /// Holds every runtime version listing until its branch is released.
  struct GatedApi {
    inner: MockOtaApi,
    gates: std::sync::Mutex<HashMap<String, Arc<Notify>>>,
  }

  impl GatedApi {
    fn new() -> Self {
      GatedApi { inner: MockOtaApi::new(), gates: Default::default() }
    }

    fn gate(&self, branch: &str) -> Arc<Notify> {
      self.gates.lock().unwrap().entry(branch.to_string()).or_default().clone()
    }
  }

  #[async_trait]
  impl OtaApi for GatedApi {
    async fn branches(&self) -> Result<Vec<Branch>, Error> {
      self.inner.branches().await
    }

    async fn runtime_versions(&self, branch: &str) -> Result<Vec<RuntimeVersion>, Error> {
      let gate = self.gate(branch);
      gate.notified().await;
      self.inner.runtime_versions(branch).await
    }

    async fn updates(&self, branch: &str, runtime_version: &str) -> Result<Vec<Update>, Error> {
      self.inner.updates(branch, runtime_version).await
    }

    async fn delete_runtime_version(&self, branch: &str, runtime_version: &str) -> Result<DeleteResult, Error> {
      self.inner.delete_runtime_version(branch, runtime_version).await
    }
  }

  fn runtime_version_list(api: Arc<dyn OtaApi>) -> (RuntimeVersionListComponent, UnboundedReceiver<Action>) {
    let mut list = RuntimeVersionListComponent::new(api);
    let (tx, rx) = unbounded_channel();
    list.register_action_handler(tx).unwrap();
    (list, rx)
  }

  async fn show(list: &mut RuntimeVersionListComponent, scope: Scope) {
    list.set_scope(scope).unwrap().await.unwrap();
  }

  fn drain(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
      actions.push(action);
    }
    actions
  }

  async fn wait_for_items(rx: &mut UnboundedReceiver<Action>, scope: &Scope) {
    loop {
      match rx.recv().await {
        Some(Action::ItemsLoaded(loaded)) if loaded == *scope => return,
        Some(_) => continue,
        None => panic!("action channel closed"),
      }
    }
  }

  fn labels(view: &ScopeView<RuntimeVersion>) -> Vec<String> {
    view.records.iter().map(|rv| rv.runtime_version.clone()).collect()
  }

  fn key(code: KeyCode) -> Option<Event> {
    Some(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
  }

  fn render(component: &mut dyn Component) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    terminal
      .draw(|frame| {
        let area = frame.area();
        component.draw(frame, area).unwrap();
      })
      .unwrap();
    let buffer = terminal.backend().buffer();
    buffer
      .content()
      .chunks(buffer.area.width as usize)
      .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n")
  }

  fn main_target(runtime_version: &str, update_count: u64) -> DeleteTarget {
    DeleteTarget { branch: "main".to_string(), runtime_version: runtime_version.to_string(), update_count }
  }

  #[tokio::test]
  async fn test_loading_indicator_until_first_result() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, _rx) = runtime_version_list(api);

    let fetch = list.set_scope(Scope::runtime_versions("main")).unwrap();
    assert_eq!(list.table_model().body, TableBody::Loading);
    assert!(render(&mut list).contains("Loading..."));

    fetch.await.unwrap();
    assert_eq!(labels(&list.view()), vec!["1.0.0", "1.1.0"]);
    assert_eq!(list.table_model().row_count(), 2);
  }

  #[tokio::test]
  async fn test_other_scopes_are_rejected() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, _rx) = runtime_version_list(api);

    assert!(list.set_scope(Scope::Branches).is_none());
    assert!(list.set_scope(Scope::updates("main", "1.0.0")).is_none());
  }

  #[tokio::test]
  async fn test_out_of_order_results_never_replace_the_current_scope() {
    let api = Arc::new(GatedApi::new());
    let (mut list, mut rx) = runtime_version_list(api.clone());

    let main_fetch = list.set_scope(Scope::runtime_versions("main")).unwrap();
    let staging_fetch = list.set_scope(Scope::runtime_versions("staging")).unwrap();

    api.gate("staging").notify_one();
    staging_fetch.await.unwrap();
    api.gate("main").notify_one();
    main_fetch.await.unwrap();

    assert_eq!(list.scope(), &Scope::runtime_versions("staging"));
    assert!(labels(&list.view()).is_empty());
    assert!(!list.view().is_loading());
    assert_eq!(labels(&list.view_of(&Scope::runtime_versions("main"))), vec!["1.0.0", "1.1.0"]);

    let actions = drain(&mut rx);
    assert!(actions.contains(&Action::ItemsLoaded(Scope::runtime_versions("main"))));
    assert_eq!(list.update(Action::ItemsLoaded(Scope::runtime_versions("main"))).await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_retrieval_error_shows_banner() {
    let api = Arc::new(MockOtaApi::new());
    api.fail_fetches_with(Some("backend unavailable"));
    let (mut list, _rx) = runtime_version_list(api);

    show(&mut list, Scope::runtime_versions("main")).await;

    assert_eq!(list.view().status, FetchStatus::Error);
    assert_eq!(list.view().error.as_deref(), Some("backend unavailable"));
    assert!(render(&mut list).contains("Failed to load runtime versions: backend unavailable"));
  }

  #[tokio::test]
  async fn test_empty_updates_render_zero_rows_without_banner() {
    let api = Arc::new(MockOtaApi::new());
    api.set_updates("main", "1.0.0", vec![]);
    let mut list = UpdateListComponent::new(api);

    list.set_scope(Scope::updates("main", "1.0.0")).unwrap().await.unwrap();

    assert_eq!(list.table_model().body, TableBody::Rows(vec![]));
    assert_eq!(list.view().error, None);
    let screen = render(&mut list);
    assert!(!screen.contains("Loading..."));
    assert!(!screen.contains("Failed to load"));
  }

  #[tokio::test]
  async fn test_unknown_platform_renders_without_icon() {
    let api = Arc::new(MockOtaApi::new());
    api.set_updates("main", "1.0.0", vec![update(42, "windows")]);
    let mut list = UpdateListComponent::new(api);

    list.set_scope(Scope::updates("main", "1.0.0")).unwrap().await.unwrap();

    assert_eq!(list.table_model().row_count(), 1);
    let screen = render(&mut list);
    assert!(screen.contains("windows"));
    assert!(screen.contains("abcdef1"));
  }

  #[tokio::test]
  async fn test_timestamp_update_ids_render_in_full() {
    let api = Arc::new(MockOtaApi::new());
    let published = Update { update_id: "1737455526045".to_string(), ..update(1, "ios") };
    api.set_updates("main", "1.0.0", vec![published]);
    let mut list = UpdateListComponent::new(api);

    list.set_scope(Scope::updates("main", "1.0.0")).unwrap().await.unwrap();

    let screen = render(&mut list);
    assert!(screen.contains("1737455526045"));
    assert!(screen.contains("00000000-0000-4000-8000-000000000001"));
  }

  #[tokio::test]
  async fn test_selection_wraps_and_drills_down() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, _rx) = runtime_version_list(api);
    show(&mut list, Scope::runtime_versions("main")).await;

    assert_eq!(list.handle_events(key(KeyCode::Down)).await.unwrap(), Some(Action::SelectNext));
    list.update(Action::SelectNext).await.unwrap();
    list.update(Action::SelectNext).await.unwrap();
    assert_eq!(list.selected_item().map(|rv| rv.runtime_version), Some("1.0.0".to_string()));

    list.update(Action::SelectPrevious).await.unwrap();
    assert_eq!(
      list.update(Action::OpenSelected).await.unwrap(),
      Some(Action::Navigate(Scope::updates("main", "1.1.0")))
    );
    assert_eq!(list.update(Action::GoUp).await.unwrap(), Some(Action::Navigate(Scope::Branches)));
  }

  #[tokio::test]
  async fn test_refresh_keeps_selected_record() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, mut rx) = runtime_version_list(api.clone());
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::SelectNext).await.unwrap();

    drain(&mut rx);
    api.set_number_of_updates("main", "1.1.0", 6);
    list.update(Action::Refresh).await.unwrap();
    assert!(list.view().is_refreshing());
    assert_eq!(list.table_model().row_count(), 2);
    wait_for_items(&mut rx, &Scope::runtime_versions("main")).await;
    list.update(Action::ItemsLoaded(Scope::runtime_versions("main"))).await.unwrap();

    let selected = list.selected_item().unwrap();
    assert_eq!(selected.runtime_version, "1.1.0");
    assert_eq!(selected.number_of_updates, 6);
  }

  #[tokio::test]
  async fn test_successful_delete_invalidates_and_refetches_branch() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, mut rx) = runtime_version_list(api);
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::SelectNext).await.unwrap();

    assert_eq!(list.update(Action::RequestDelete).await.unwrap(), Some(Action::StartConfirmMode));
    list.confirm_delete().unwrap().await.unwrap();
    let outcome = drain(&mut rx).into_iter().find(|action| matches!(action, Action::DeleteSucceeded { .. })).unwrap();
    assert_eq!(
      outcome,
      Action::DeleteSucceeded {
        target: main_target("1.1.0", 5),
        result: DeleteResult { deleted_count: 5, total_count: 5 }
      }
    );

    assert_eq!(list.update(outcome).await.unwrap(), Some(Action::EndConfirmMode));
    assert!(!list.delete_dialog().is_open());
    assert!(list.view().is_loading());
    assert!(drain(&mut rx).contains(&Action::Notify(Notification::info(
      "Runtime version deleted",
      "Successfully deleted 5 of 5 updates."
    ))));

    wait_for_items(&mut rx, &Scope::runtime_versions("main")).await;
    assert_eq!(labels(&list.view()), vec!["1.0.0"]);
  }

  #[tokio::test]
  async fn test_dialog_count_is_frozen_at_activation() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, mut rx) = runtime_version_list(api.clone());
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::RequestDelete).await.unwrap();

    drain(&mut rx);
    api.set_number_of_updates("main", "1.0.0", 9);
    list.update(Action::Refresh).await.unwrap();
    wait_for_items(&mut rx, &Scope::runtime_versions("main")).await;

    assert_eq!(list.view().records[0].number_of_updates, 9);
    assert_eq!(list.delete_dialog().target(), Some(&main_target("1.0.0", 2)));
  }

  #[tokio::test]
  async fn test_controls_are_disabled_while_delete_is_pending() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, _rx) = runtime_version_list(api);
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::RequestDelete).await.unwrap();

    let delete = list.confirm_delete().unwrap();
    assert!(list.delete_dialog().is_pending());
    assert!(!list.delete_dialog().controls_enabled());
    assert_eq!(list.handle_events(key(KeyCode::Char('n'))).await.unwrap(), None);
    assert_eq!(list.handle_events(key(KeyCode::Char('y'))).await.unwrap(), None);
    assert_eq!(list.update(Action::CancelDelete).await.unwrap(), None);
    assert!(list.confirm_delete().is_none());
    assert!(render(&mut list).contains("Deleting..."));

    delete.await.unwrap();
  }

  #[tokio::test]
  async fn test_failed_delete_returns_to_confirming() {
    let api = Arc::new(MockOtaApi::new());
    api.fail_deletes_with(Some("permission denied"));
    let (mut list, mut rx) = runtime_version_list(api);
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::RequestDelete).await.unwrap();

    list.confirm_delete().unwrap().await.unwrap();
    let outcome = drain(&mut rx).into_iter().find(|action| matches!(action, Action::DeleteFailed { .. })).unwrap();

    assert_eq!(
      list.update(outcome).await.unwrap(),
      Some(Action::Notify(Notification::destructive("Delete failed", "permission denied")))
    );
    assert!(list.delete_dialog().controls_enabled());
    assert_eq!(list.delete_dialog().target(), Some(&main_target("1.0.0", 2)));
    assert_eq!(labels(&list.view()), vec!["1.0.0", "1.1.0"]);
    assert_eq!(list.handle_events(key(KeyCode::Esc)).await.unwrap(), Some(Action::CancelDelete));
  }

  #[tokio::test]
  async fn test_failed_delete_without_message_uses_fallback() {
    let api = Arc::new(MockOtaApi::new());
    api.fail_deletes_with(Some(""));
    let (mut list, mut rx) = runtime_version_list(api);
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::RequestDelete).await.unwrap();

    list.confirm_delete().unwrap().await.unwrap();
    let outcome = drain(&mut rx).into_iter().find(|action| matches!(action, Action::DeleteFailed { .. })).unwrap();

    assert_eq!(
      list.update(outcome).await.unwrap(),
      Some(Action::Notify(Notification::destructive("Delete failed", "Failed to delete runtime version")))
    );
  }

  #[tokio::test]
  async fn test_dialog_keys() {
    let api = Arc::new(MockOtaApi::new());
    let (mut list, _rx) = runtime_version_list(api);
    show(&mut list, Scope::runtime_versions("main")).await;
    list.update(Action::RequestDelete).await.unwrap();

    assert_eq!(list.handle_events(key(KeyCode::Enter)).await.unwrap(), Some(Action::CancelDelete));
    assert_eq!(list.handle_events(key(KeyCode::Tab)).await.unwrap(), Some(Action::ToggleDialogFocus));
    list.update(Action::ToggleDialogFocus).await.unwrap();
    assert_eq!(list.handle_events(key(KeyCode::Enter)).await.unwrap(), Some(Action::ConfirmDelete));
    assert_eq!(list.update(Action::CancelDelete).await.unwrap(), Some(Action::EndConfirmMode));
    assert!(!list.delete_dialog().is_open());
  }
}
