//! テスト用の action と handler
//!
//! `Recording` は呼び出し回数を数え、指定された振る舞い（成功・失敗・panic・停止）をする。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ActionKind, HandlerError, Labeled};
use crate::ports::Handler;

pub(crate) const KIND: &str = "mock.service";

pub(crate) fn kind() -> ActionKind {
    ActionKind::new(KIND).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MockAction {
    pub label: &'static str,
}

pub(crate) fn action(label: &'static str) -> MockAction {
    MockAction { label }
}

impl Labeled for MockAction {
    fn label(&self) -> &str {
        self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service failure: {0}")]
pub(crate) struct ServiceFailure(pub &'static str);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    Reply,
    Fail(&'static str),
    Panic(&'static str),
    Hang,
}

pub(crate) struct Recording {
    name: &'static str,
    kind: ActionKind,
    behavior: Behavior,
    calls: AtomicUsize,
    cancelled: AtomicBool,
}

impl Recording {
    pub(crate) fn new(name: &'static str) -> Self {
        Self::with_behavior(name, Behavior::Reply)
    }

    pub(crate) fn with_behavior(name: &'static str, behavior: Behavior) -> Self {
        Self::of_kind(name, kind(), behavior)
    }

    pub(crate) fn of_kind(name: &'static str, kind: ActionKind, behavior: Behavior) -> Self {
        Self {
            name,
            kind,
            behavior,
            calls: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Sets the flag when the in-flight execution is dropped.
struct CancelGuard<'a>(&'a AtomicBool);

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Handler<MockAction> for Recording {
    type Output = String;

    fn action_kind(&self) -> &ActionKind {
        &self.kind
    }

    async fn execute(&self, action: MockAction) -> Result<String, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Reply => Ok(format!("{}:{}", self.name, action.label)),
            Behavior::Fail(message) => Err(Box::new(ServiceFailure(message))),
            Behavior::Panic(message) => panic!("{message}"),
            Behavior::Hang => {
                let _guard = CancelGuard(&self.cancelled);
                std::future::pending().await
            }
        }
    }
}
