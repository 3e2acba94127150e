use std::{collections::HashMap, sync::Arc, time::SystemTime};

use crate::navigation::Scope;

/// Scopes kept per view before the least recently used ones are dropped.
pub const MAX_CACHED_SCOPES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
  Idle,
  Loading(SystemTime),
  Success,
  Error,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
  pub status: FetchStatus,
  pub data: Option<Arc<Vec<T>>>,
  pub error: Option<String>,
  pub last_fetched_at: Option<SystemTime>,
  in_flight: Option<u64>,
  last_used: u64,
}

impl<T> Default for CacheEntry<T> {
  fn default() -> Self {
    CacheEntry {
      status: FetchStatus::Idle,
      data: None,
      error: None,
      last_fetched_at: None,
      in_flight: None,
      last_used: 0,
    }
  }
}

/// Issued when a fetch starts. Only the newest ticket of a scope may commit into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
  pub scope: Scope,
  generation: u64,
}

/// What a view shows for one scope.
#[derive(Debug, Clone)]
pub struct ScopeView<T> {
  pub records: Arc<Vec<T>>,
  pub status: FetchStatus,
  pub error: Option<String>,
  pub last_fetched_at: Option<SystemTime>,
}

impl<T> ScopeView<T> {
  /// Loading with nothing to show yet.
  pub fn is_loading(&self) -> bool {
    matches!(self.status, FetchStatus::Loading(_)) && self.last_fetched_at.is_none()
  }

  /// Loading while earlier records stay on screen.
  pub fn is_refreshing(&self) -> bool {
    matches!(self.status, FetchStatus::Loading(_)) && self.last_fetched_at.is_some()
  }
}

/// Per-scope fetch cache owned by a list view.
#[derive(Debug)]
pub struct ScopeCache<T> {
  entries: HashMap<Scope, CacheEntry<T>>,
  next_generation: u64,
}

impl<T> Default for ScopeCache<T> {
  fn default() -> Self {
    ScopeCache { entries: HashMap::new(), next_generation: 0 }
  }
}

impl<T> ScopeCache<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Marks the scope as loading and supersedes any fetch already in flight for it.
  pub fn begin(&mut self, scope: &Scope) -> FetchTicket {
    self.next_generation += 1;
    let generation = self.next_generation;
    let entry = self.entries.entry(scope.clone()).or_default();
    entry.status = FetchStatus::Loading(SystemTime::now());
    entry.error = None;
    entry.in_flight = Some(generation);
    entry.last_used = generation;
    self.evict_least_recently_used(scope);
    FetchTicket { scope: scope.clone(), generation }
  }

  /// Keeps at most `MAX_CACHED_SCOPES` entries. Scopes with a fetch in flight are never dropped.
  fn evict_least_recently_used(&mut self, keep: &Scope) {
    while self.entries.len() > MAX_CACHED_SCOPES {
      let oldest = self
        .entries
        .iter()
        .filter(|(scope, entry)| *scope != keep && entry.in_flight.is_none())
        .min_by_key(|(_, entry)| entry.last_used)
        .map(|(scope, _)| scope.clone());
      match oldest {
        Some(scope) => {
          self.entries.remove(&scope);
        },
        None => break,
      }
    }
  }

  /// Stores a fetch result in its own scope. Returns false when the ticket was superseded or the
  /// scope was invalidated in the meantime, in which case nothing changes.
  pub fn commit(&mut self, ticket: FetchTicket, result: Result<Vec<T>, String>) -> bool {
    let Some(entry) = self.entries.get_mut(&ticket.scope) else {
      return false;
    };
    if entry.in_flight != Some(ticket.generation) {
      return false;
    }
    entry.in_flight = None;
    entry.last_fetched_at = Some(SystemTime::now());
    match result {
      Ok(records) => {
        entry.status = FetchStatus::Success;
        entry.data = Some(Arc::new(records));
        entry.error = None;
      },
      Err(message) => {
        entry.status = FetchStatus::Error;
        entry.error = Some(message);
      },
    }
    true
  }

  /// Drops everything cached for the scope so the next render has to fetch it again.
  pub fn invalidate(&mut self, scope: &Scope) -> bool {
    self.entries.remove(scope).is_some()
  }

  pub fn get(&self, scope: &Scope) -> Option<&CacheEntry<T>> {
    self.entries.get(scope)
  }

  pub fn view(&self, scope: &Scope) -> ScopeView<T> {
    match self.entries.get(scope) {
      Some(entry) => ScopeView {
        records: entry.data.clone().unwrap_or_default(),
        status: entry.status,
        error: entry.error.clone(),
        last_fetched_at: entry.data.as_ref().and(entry.last_fetched_at),
      },
      None => ScopeView { records: Arc::default(), status: FetchStatus::Idle, error: None, last_fetched_at: None },
    }
  }
}
