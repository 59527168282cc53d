//! Closure-backed handler.

use std::future::Future;

use async_trait::async_trait;

use crate::domain::{ActionKind, HandlerError};
use crate::ports::Handler;

/// A [`Handler`] that runs an async closure.
///
/// # 使用例
/// ```ignore
/// let echo = FnHandler::new(kind, |action: String| async move { Ok(action) });
/// ```
pub struct FnHandler<F> {
    kind: ActionKind,
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(kind: ActionKind, f: F) -> Self {
        Self { kind, f }
    }
}

#[async_trait]
impl<A, O, F, Fut> Handler<A> for FnHandler<F>
where
    A: Send + 'static,
    O: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O, HandlerError>> + Send,
{
    type Output = O;

    fn action_kind(&self) -> &ActionKind {
        &self.kind
    }

    async fn execute(&self, action: A) -> Result<O, HandlerError> {
        (self.f)(action).await
    }
}
