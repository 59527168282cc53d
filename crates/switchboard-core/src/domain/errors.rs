//! Errors - 構築時エラーと dispatch 時エラー
//!
//! # 分類
//! - [`BuildError`]: 構築時の設定ミス（プログラマのミス、リトライしない）
//! - [`DispatchError::NoRoute`]: どの rule にも一致しない
//! - [`DispatchError::Internal`]: handler が失敗した（元のエラーを cause として保持）

use thiserror::Error;

/// Failure type handlers report.
///
/// Boxed so the dispatcher can relay any handler's error without knowing its
/// type, and so callers can downcast back to the exact original.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid dispatcher configuration, raised only while building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("invalid action kind {0:?}: expected dot-separated [a-z0-9_-] segments")]
    InvalidKind(String),

    #[error("handler declares action kind '{found}' but dispatcher routes '{expected}'")]
    KindMismatch { expected: String, found: String },

    #[error("dispatcher for action kind '{kind}' has no routes")]
    NoRoutes { kind: String },
}

/// Failure of a single `dispatch` call.
///
/// Callers match on the variant to tell a missing route from a failed handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No mapping rule matched. No handler was invoked.
    #[error("no handler found for action (kind={kind})")]
    NoRoute { kind: String },

    /// The handler at `route` failed. `source` is its error, untouched.
    #[error("handler for route #{route} failed: {source}")]
    Internal {
        route: usize,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    pub fn is_no_route(&self) -> bool {
        matches!(self, Self::NoRoute { .. })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// The wrapped handler failure, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Internal { source, .. } => Some(source.as_ref()),
            Self::NoRoute { .. } => None,
        }
    }

    /// Takes the wrapped handler failure back out, e.g. to `downcast` it.
    pub fn into_cause(self) -> Option<HandlerError> {
        match self {
            Self::Internal { source, .. } => Some(source),
            Self::NoRoute { .. } => None,
        }
    }
}

/// A handler panicked while executing an action.
///
/// Surfaced as the cause of [`DispatchError::Internal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler panicked: {message}")]
pub struct HandlerPanicked {
    pub message: String,
}

impl HandlerPanicked {
    pub(crate) fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, PartialEq, Error)]
    #[error("backend exploded")]
    struct Exploded;

    #[test]
    fn no_route_message_names_the_failure() {
        let err = DispatchError::NoRoute {
            kind: "http".to_string(),
        };
        assert!(err.to_string().contains("no handler found for action"));
        assert!(err.is_no_route());
        assert!(err.source().is_none());
        assert!(err.into_cause().is_none());
    }

    #[test]
    fn internal_exposes_original_as_source() {
        let err = DispatchError::Internal {
            route: 1,
            source: Box::new(Exploded),
        };
        assert!(err.is_internal());
        let source = err.source().unwrap();
        assert_eq!(source.downcast_ref::<Exploded>(), Some(&Exploded));
        assert!(err.cause().unwrap().is::<Exploded>());
    }

    #[test]
    fn into_cause_is_lossless() {
        let err = DispatchError::Internal {
            route: 0,
            source: Box::new(Exploded),
        };
        let cause = err.into_cause().unwrap();
        assert_eq!(*cause.downcast::<Exploded>().unwrap(), Exploded);
    }

    #[test]
    fn panic_payloads_become_messages() {
        let p: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(HandlerPanicked::from_payload(&*p).message, "boom");

        let p: Box<dyn std::any::Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(HandlerPanicked::from_payload(&*p).message, "kaboom");

        let p: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(
            HandlerPanicked::from_payload(&*p).message,
            "non-string panic payload"
        );
    }
}
