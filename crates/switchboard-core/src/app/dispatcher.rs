//! Dispatcher - route を先頭から走査して最初に一致した handler へ委譲する
//!
//! # フロー（dispatch 1 回ごと）
//! 1. Resolving: route を登録順に評価し、最初に rule が true を返したものを選ぶ
//! 2. 一致なし → `DispatchError::NoRoute`（handler は一つも呼ばない）
//! 3. 一致あり → その handler だけを実行
//! 4. 成功はそのまま返す。失敗と panic は `DispatchError::Internal` に包む
//!
//! route table は構築後は読み取り専用なので、ロックなしで並行 dispatch できる。

use std::fmt;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::trace;

use crate::domain::{ActionKind, DispatchError, HandlerError, HandlerPanicked};
use crate::ports::{Handler, MappingRule, SharedHandler};

use super::builder::DispatcherBuilder;

/// One (handler, rule) entry of the routing table.
pub(crate) struct Route<A, O> {
    pub(crate) handler: SharedHandler<A, O>,
    pub(crate) rule: MappingRule<A>,
}

/// Routes each action to the first registered handler whose rule matches.
///
/// Built through [`DispatcherBuilder`]; the routing table cannot change
/// afterwards. A dispatcher is itself a [`Handler`] for its kind, so it can be
/// registered inside another dispatcher.
pub struct Dispatcher<A, O> {
    kind: ActionKind,
    routes: Box<[Route<A, O>]>,
}

impl<A, O> Dispatcher<A, O>
where
    A: Send + 'static,
    O: Send + 'static,
{
    pub(crate) fn from_routes(kind: ActionKind, routes: Vec<Route<A, O>>) -> Self {
        Self {
            kind,
            routes: routes.into_boxed_slice(),
        }
    }

    /// Shorthand for [`DispatcherBuilder::for_kind`].
    pub fn builder(kind: ActionKind) -> DispatcherBuilder<A, O> {
        DispatcherBuilder::for_kind(kind)
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Number of routes. Never zero for a built dispatcher.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Index of the route that would handle `action`, without executing it.
    pub fn resolve(&self, action: &A) -> Option<usize> {
        self.routes.iter().position(|route| (route.rule)(action))
    }

    /// Executes `action` on the first matching route.
    ///
    /// Exactly one handler runs when a route matches, none otherwise. Dropping
    /// the returned future drops the delegated handler's future with it.
    pub async fn dispatch(&self, action: A) -> Result<O, DispatchError> {
        let Some(index) = self.resolve(&action) else {
            trace!(kind = %self.kind, "no route matched");
            return Err(DispatchError::NoRoute {
                kind: self.kind.to_string(),
            });
        };
        trace!(kind = %self.kind, route = index, "route resolved");

        let handler = &self.routes[index].handler;
        match AssertUnwindSafe(handler.execute(action)).catch_unwind().await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(source)) => Err(DispatchError::Internal {
                route: index,
                source,
            }),
            Err(payload) => Err(DispatchError::Internal {
                route: index,
                source: Box::new(HandlerPanicked::from_payload(&*payload)),
            }),
        }
    }
}

#[async_trait]
impl<A, O> Handler<A> for Dispatcher<A, O>
where
    A: Send + 'static,
    O: Send + 'static,
{
    type Output = O;

    fn action_kind(&self) -> &ActionKind {
        &self.kind
    }

    async fn execute(&self, action: A) -> Result<O, HandlerError> {
        self.dispatch(action).await.map_err(Into::into)
    }
}

impl<A, O> fmt::Debug for Dispatcher<A, O>
where
    A: Send + 'static,
    O: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self
            .routes
            .iter()
            .map(|route| Handler::<A>::action_kind(&*route.handler).as_str())
            .collect();
        f.debug_struct("Dispatcher")
            .field("kind", &self.kind)
            .field("routes", &kinds)
            .finish()
    }
}
