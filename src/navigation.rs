//! Shareable navigation state.
//!
//! The dashboard location is a [`Scope`]: which branch and runtime version are being looked at. A scope is
//! an immutable value that round-trips through the `branch` and `runtimeVersion` query parameters, so any
//! view can be reopened from a copied location.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

pub const BRANCH_PARAM: &str = "branch";
pub const RUNTIME_VERSION_PARAM: &str = "runtimeVersion";

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
  #[default]
  Branches,
  RuntimeVersions {
    branch: String,
  },
  Updates {
    branch: String,
    runtime_version: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeChange {
  SelectBranch(String),
  SelectRuntimeVersion(String),
  Up,
  Root,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
  pub label: String,
  pub scope: Scope,
}

impl Scope {
  pub fn runtime_versions(branch: impl Into<String>) -> Self {
    Scope::RuntimeVersions { branch: branch.into() }
  }

  pub fn updates(branch: impl Into<String>, runtime_version: impl Into<String>) -> Self {
    Scope::Updates { branch: branch.into(), runtime_version: runtime_version.into() }
  }

  /// Parses a location: a bare query (`branch=main`), a query with its leading `?`, or a full URL.
  /// Parameters that are missing or empty fall back to the nearest ancestor scope.
  pub fn parse(location: &str) -> Self {
    let location = location.trim();
    let query = match Url::parse(location) {
      Ok(url) => url.query().unwrap_or_default().to_string(),
      Err(_) => {
        let without_fragment = location.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
          Some((_, query)) => query.to_string(),
          None => without_fragment.to_string(),
        }
      },
    };
    Self::from_query_pairs(form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())))
  }

  pub fn from_query_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
    let mut branch = None;
    let mut runtime_version = None;
    for (key, value) in pairs {
      let value = value.trim().to_string();
      if value.is_empty() {
        continue;
      }
      match key.as_str() {
        BRANCH_PARAM if branch.is_none() => branch = Some(value),
        RUNTIME_VERSION_PARAM if runtime_version.is_none() => runtime_version = Some(value),
        _ => {},
      }
    }

    match (branch, runtime_version) {
      (Some(branch), Some(runtime_version)) => Scope::Updates { branch, runtime_version },
      (Some(branch), None) => Scope::RuntimeVersions { branch },
      (None, _) => Scope::Branches,
    }
  }

  pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
    match self {
      Scope::Branches => vec![],
      Scope::RuntimeVersions { branch } => vec![(BRANCH_PARAM, branch.as_str())],
      Scope::Updates { branch, runtime_version } => {
        vec![(BRANCH_PARAM, branch.as_str()), (RUNTIME_VERSION_PARAM, runtime_version.as_str())]
      },
    }
  }

  /// The shareable query string for this scope, empty for the root.
  pub fn to_query(&self) -> String {
    let pairs = self.query_pairs();
    if pairs.is_empty() {
      return String::new();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
      serializer.append_pair(key, value);
    }
    format!("?{}", serializer.finish())
  }

  pub fn apply(&self, change: ScopeChange) -> Scope {
    match change {
      ScopeChange::SelectBranch(branch) if !branch.is_empty() => Scope::RuntimeVersions { branch },
      ScopeChange::SelectRuntimeVersion(runtime_version) if !runtime_version.is_empty() => match self {
        Scope::Branches => self.clone(),
        Scope::RuntimeVersions { branch } | Scope::Updates { branch, .. } => {
          Scope::Updates { branch: branch.clone(), runtime_version }
        },
      },
      ScopeChange::Up => self.parent().unwrap_or_default(),
      ScopeChange::Root => Scope::Branches,
      _ => self.clone(),
    }
  }

  pub fn parent(&self) -> Option<Scope> {
    match self {
      Scope::Branches => None,
      Scope::RuntimeVersions { .. } => Some(Scope::Branches),
      Scope::Updates { branch, .. } => Some(Scope::RuntimeVersions { branch: branch.clone() }),
    }
  }

  pub fn branch(&self) -> Option<&str> {
    match self {
      Scope::Branches => None,
      Scope::RuntimeVersions { branch } | Scope::Updates { branch, .. } => Some(branch.as_str()),
    }
  }

  pub fn runtime_version(&self) -> Option<&str> {
    match self {
      Scope::Updates { runtime_version, .. } => Some(runtime_version.as_str()),
      _ => None,
    }
  }

  pub fn is_root(&self) -> bool {
    matches!(self, Scope::Branches)
  }

  /// Root first, ending with this scope.
  pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb { label: "Branches".to_string(), scope: Scope::Branches }];
    if let Some(branch) = self.branch() {
      crumbs.push(Breadcrumb { label: branch.to_string(), scope: Scope::runtime_versions(branch) });
    }
    if let Some(runtime_version) = self.runtime_version() {
      crumbs.push(Breadcrumb { label: runtime_version.to_string(), scope: self.clone() });
    }
    crumbs
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let query = self.to_query();
    if query.is_empty() { f.write_str("/") } else { write!(f, "/{query}") }
  }
}
