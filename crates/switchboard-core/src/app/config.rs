//! RoutingConfig - TOML で routing table を記述する
//!
//! ```toml
//! kind = "http"
//!
//! [[routes]]
//! label = "github"
//! backend = "github"
//!
//! [[routes]]
//! labels = ["xkcd", "comic"]
//! backend = "xkcd"
//!
//! [[routes]]
//! any = true
//! backend = "fallback"
//! ```
//!
//! backend 名は呼び出し側が渡す handler の表で解決する。route の順序はファイルの順序。

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{BuildError, Labeled};
use crate::ports::{SharedHandler, rule};

use super::builder::DispatcherBuilder;
use super::dispatcher::Dispatcher;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read routing config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse routing config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("route #{route} refers to unknown backend '{backend}'")]
    UnknownBackend { route: usize, backend: String },

    #[error("route #{route} (backend '{backend}') has no match condition")]
    MissingCondition { route: usize, backend: String },

    #[error("route #{route} (backend '{backend}') sets more than one of label, labels, any")]
    ConflictingConditions { route: usize, backend: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A routing table as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub kind: String,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One route. Exactly one of `label`, `labels` or `any` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub backend: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub any: bool,
}

impl RoutingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading routing config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Builds a dispatcher whose routes point at handlers from `backends`.
    ///
    /// Builder validation still applies: the kind must be valid, every backend
    /// must declare it, and at least one route must exist.
    pub fn build_dispatcher<A, O>(
        &self,
        backends: &HashMap<String, SharedHandler<A, O>>,
    ) -> Result<Dispatcher<A, O>, ConfigError>
    where
        A: Labeled + Send + 'static,
        O: Send + 'static,
    {
        let mut builder = DispatcherBuilder::new(&self.kind)?;
        for (index, route) in self.routes.iter().enumerate() {
            let handler = backends
                .get(&route.backend)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownBackend {
                    route: index,
                    backend: route.backend.clone(),
                })?;

            let conditions = usize::from(route.any)
                + usize::from(!route.labels.is_empty())
                + usize::from(route.label.is_some());
            if conditions > 1 {
                return Err(ConfigError::ConflictingConditions {
                    route: index,
                    backend: route.backend.clone(),
                });
            }

            builder = if route.any {
                builder.add_shared(handler, rule::always())?
            } else if !route.labels.is_empty() {
                builder.add_shared(handler, rule::label_in(&route.labels))?
            } else if let Some(label) = &route.label {
                builder.add_shared(handler, rule::label_is(label))?
            } else {
                return Err(ConfigError::MissingCondition {
                    route: index,
                    backend: route.backend.clone(),
                });
            };
        }
        Ok(builder.build()?)
    }
}
