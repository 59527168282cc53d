//! DispatcherBuilder - routing table の構築と検証
//!
//! # Fail-fast 設計
//! - `new()`: action kind が命名規約に従っていなければ `BuildError::InvalidKind`
//! - `add()`: handler の宣言する kind が違えば `BuildError::KindMismatch`
//! - `build()`: route が一つもなければ `BuildError::NoRoutes`
//!
//! 検証はすべて構築時に行うので、dispatch 時に kind を比較することはない。

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{ActionKind, BuildError};
use crate::ports::{Handler, SharedHandler};

use super::dispatcher::{Dispatcher, Route};

/// Accumulates routes for one action kind and produces a [`Dispatcher`].
///
/// # 使用例
/// ```ignore
/// let dispatcher = DispatcherBuilder::new("http")?
///     .add(github, rule::label_is("github"))?
///     .add(xkcd, rule::label_is("xkcd"))?
///     .build()?;
/// ```
///
/// Route order is significant: at dispatch time the first matching rule wins.
pub struct DispatcherBuilder<A, O> {
    kind: ActionKind,
    routes: Vec<Route<A, O>>,
}

impl<A, O> DispatcherBuilder<A, O>
where
    A: Send + 'static,
    O: Send + 'static,
{
    /// Starts a builder for the kind named `kind`.
    pub fn new(kind: &str) -> Result<Self, BuildError> {
        Ok(Self::for_kind(ActionKind::new(kind)?))
    }

    /// Starts a builder for an already validated kind.
    pub fn for_kind(kind: ActionKind) -> Self {
        Self {
            kind,
            routes: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Appends a route owned by `handler`, taken when `rule` returns true.
    pub fn add<H, R>(self, handler: H, rule: R) -> Result<Self, BuildError>
    where
        H: Handler<A, Output = O> + 'static,
        R: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.add_shared(Arc::new(handler), rule)
    }

    /// Like [`add`](Self::add) for a handler that is already type-erased.
    pub fn add_shared<R>(mut self, handler: SharedHandler<A, O>, rule: R) -> Result<Self, BuildError>
    where
        R: Fn(&A) -> bool + Send + Sync + 'static,
    {
        let declared = Handler::<A>::action_kind(&handler);
        if *declared != self.kind {
            return Err(BuildError::KindMismatch {
                expected: self.kind.to_string(),
                found: declared.to_string(),
            });
        }
        self.routes.push(Route {
            handler,
            rule: Box::new(rule),
        });
        Ok(self)
    }

    /// Freezes the routing table.
    pub fn build(self) -> Result<Dispatcher<A, O>, BuildError> {
        if self.routes.is_empty() {
            return Err(BuildError::NoRoutes {
                kind: self.kind.to_string(),
            });
        }
        debug!(kind = %self.kind, routes = self.routes.len(), "dispatcher built");
        Ok(Dispatcher::from_routes(self.kind, self.routes))
    }
}

impl<A, O> fmt::Debug for DispatcherBuilder<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("kind", &self.kind)
            .field("routes", &self.routes.len())
            .finish()
    }
}
