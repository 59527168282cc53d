//! LoggingHandler - handler をラップして送信・成功・失敗をログに出す
//!
//! 結果には一切手を加えない。宣言する kind も内側の handler のものをそのまま返すので、
//! dispatcher の外側にも内側の route にも差し込める。

use std::fmt::Debug;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{ActionKind, HandlerError};
use crate::ports::Handler;

pub struct LoggingHandler<H> {
    name: String,
    inner: H,
}

impl<H> LoggingHandler<H> {
    pub fn new(name: impl Into<String>, inner: H) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

#[async_trait]
impl<A, H> Handler<A> for LoggingHandler<H>
where
    A: Debug + Send + 'static,
    H: Handler<A>,
{
    type Output = H::Output;

    fn action_kind(&self) -> &ActionKind {
        self.inner.action_kind()
    }

    async fn execute(&self, action: A) -> Result<Self::Output, HandlerError> {
        info!(handler = %self.name, kind = %self.inner.action_kind(), ?action, "sending action");
        let started = Instant::now();
        let result = self.inner.execute(action).await;
        let elapsed_ms = millis(started.elapsed());
        match &result {
            Ok(_) => info!(handler = %self.name, elapsed_ms, "action succeeded"),
            Err(error) => warn!(handler = %self.name, elapsed_ms, %error, "action failed"),
        }
        result
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Dispatcher;
    use crate::ports::rule::label_is;
    use crate::testing::{Behavior, MockAction, Recording, ServiceFailure, action, kind};
    use std::sync::Arc;

    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    }

    #[tokio::test]
    async fn passes_success_through_and_keeps_kind() {
        init_test_tracing();
        let inner = Arc::new(Recording::new("inner"));
        let logged = LoggingHandler::new("sample", Arc::clone(&inner));

        assert_eq!(Handler::<MockAction>::action_kind(&logged), &kind());
        assert_eq!(logged.name(), "sample");
        assert_eq!(logged.execute(action("x")).await.unwrap(), "inner:x");
        assert_eq!(logged.inner().calls(), 1);
    }

    #[tokio::test]
    async fn passes_failure_through_untouched() {
        init_test_tracing();
        let logged = LoggingHandler::new(
            "sample",
            Recording::with_behavior("inner", Behavior::Fail("nope")),
        );

        let err = logged.execute(action("x")).await.unwrap_err();
        assert_eq!(err.downcast_ref::<ServiceFailure>(), Some(&ServiceFailure("nope")));
    }

    #[tokio::test]
    async fn wraps_a_whole_dispatcher() {
        init_test_tracing();
        let a = Arc::new(Recording::new("a"));
        let dispatcher = Dispatcher::builder(kind())
            .add(Arc::clone(&a), label_is("a"))
            .unwrap()
            .build()
            .unwrap();
        let logged = LoggingHandler::new("proxy", dispatcher);

        assert_eq!(logged.execute(action("a")).await.unwrap(), "a:a");
        assert!(logged.execute(action("b")).await.is_err());
        assert_eq!(a.calls(), 1);
    }

    #[test]
    fn elapsed_millis_saturate_instead_of_wrapping() {
        assert_eq!(millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
