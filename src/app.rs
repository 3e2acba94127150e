use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
  action::Action,
  api::{HttpOtaApi, OtaApi},
  cli::Cli,
  components::{
    AsyncComponent, BranchListComponent, Component, RuntimeVersionListComponent, UpdateListComponent,
    shared::{
      breadcrumbs::Breadcrumbs,
      notifications::{Notification, NotificationTray},
    },
  },
  config::Config,
  mode::Mode,
  navigation::Scope,
  tui::{self, Tui},
};

pub struct App {
  pub scope: Scope,
  pub branch_list: BranchListComponent,
  pub runtime_version_list: RuntimeVersionListComponent,
  pub update_list: UpdateListComponent,
  pub breadcrumbs: Breadcrumbs,
  pub notifications: NotificationTray,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  pub tick_rate: f64,
  pub frame_rate: f64,
}

impl App {
  pub fn new(config: &Config, args: &Cli) -> Result<Self> {
    let api: Arc<dyn OtaApi> =
      Arc::new(HttpOtaApi::from_url(&config.api_url, config.api_token.clone(), config.request_timeout())?);
    let scope = args.location.as_deref().map(Scope::parse).unwrap_or_default();
    info!("Connecting to {} at {}", config.api_url, scope);
    Ok(Self::with_api(api, scope, config.notification_ticks, args.tick_rate, args.frame_rate))
  }

  pub fn with_api(
    api: Arc<dyn OtaApi>,
    scope: Scope,
    notification_ticks: u16,
    tick_rate: f64,
    frame_rate: f64,
  ) -> Self {
    Self {
      scope,
      branch_list: BranchListComponent::new(api.clone()),
      runtime_version_list: RuntimeVersionListComponent::new(api.clone()),
      update_list: UpdateListComponent::new(api),
      breadcrumbs: Breadcrumbs::default(),
      notifications: NotificationTray::new(notification_ticks),
      should_quit: false,
      should_suspend: false,
      mode: Mode::Default,
      tick_rate,
      frame_rate,
    }
  }

  /// The list that shows the current scope. Every action is routed to it.
  fn active_component(&mut self) -> &mut dyn AsyncComponent {
    match self.scope {
      Scope::Branches => &mut self.branch_list,
      Scope::RuntimeVersions { .. } => &mut self.runtime_version_list,
      Scope::Updates { .. } => &mut self.update_list,
    }
  }

  fn register_action_handler(&mut self, tx: &UnboundedSender<Action>) -> Result<()> {
    self.branch_list.register_action_handler(tx.clone())?;
    self.runtime_version_list.register_action_handler(tx.clone())?;
    self.update_list.register_action_handler(tx.clone())?;
    Ok(())
  }

  fn handle_key(&self, key: KeyEvent) -> Option<Action> {
    if self.mode != Mode::Default {
      return None;
    }
    match key {
      KeyEvent { code: KeyCode::Char('q'), .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
      _ => None,
    }
  }

  /// Applies the app level part of an action. The active list sees every action afterwards.
  fn apply(&mut self, action: &Action) -> Option<Action> {
    match action {
      Action::Tick if self.notifications.tick() => return Some(Action::Render),
      Action::StartConfirmMode => self.mode = Mode::Confirm,
      Action::EndConfirmMode => self.mode = Mode::Default,
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      Action::Navigate(scope) => {
        info!("Navigating to {}", scope);
        self.scope = scope.clone();
      },
      Action::Notify(notification) => {
        self.notifications.push(notification.clone());
        return Some(Action::Render);
      },
      Action::Error(message) => {
        error!("{}", message);
        self.notifications.push(Notification::destructive("Error", message.clone()));
        return Some(Action::Render);
      },
      _ => {},
    }
    None
  }

  fn render(&mut self, tui: &mut Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    tui.draw(|frame| {
      let area = frame.area();
      let [header, body] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
      self.breadcrumbs.render(frame, header, &self.scope);
      if let Err(e) = self.active_component().draw(frame, body) {
        let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", e)));
      }
      self.notifications.render(frame, area);
    })?;
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    self.register_action_handler(&action_tx)?;
    action_tx.send(Action::Navigate(self.scope.clone()))?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = self.handle_key(key) {
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if let Some(action) = self.active_component().handle_events(Some(e.clone())).await? {
          action_tx.send(action)?;
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          debug!("{action:?}");
        }
        if let Some(follow_up) = self.apply(&action) {
          action_tx.send(follow_up)?;
        }
        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui, &action_tx)?;
          },
          Action::Render => self.render(&mut tui, &action_tx)?,
          _ => {},
        }
        if let Some(action) = self.active_component().update(action.clone()).await? {
          action_tx.send(action)?
        };
      }

      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui.resume()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }
}
