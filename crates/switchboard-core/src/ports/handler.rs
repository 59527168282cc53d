//! Handler trait - action を実行する backend の抽象化
//!
//! # 二つの責務
//! - `action_kind()`: 自分が扱う action ファミリーを宣言する（登録時に検証される）
//! - `execute()`: action を非同期に実行し、結果か失敗を返す
//!
//! `Arc<H>` も Handler になるので、同じ handler を dispatcher と呼び出し側で
//! 共有できる（`Arc<dyn Handler<A, Output = O>>` を含む）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ActionKind, HandlerError};

/// A backend that executes actions of one declared kind.
///
/// # 使用例
/// ```ignore
/// struct GithubBackend {
///     kind: ActionKind,
/// }
///
/// #[async_trait]
/// impl Handler<HttpAction> for GithubBackend {
///     type Output = String;
///
///     fn action_kind(&self) -> &ActionKind {
///         &self.kind
///     }
///
///     async fn execute(&self, action: HttpAction) -> Result<String, HandlerError> {
///         Ok(format!("GET {}", action.path))
///     }
/// }
/// ```
///
/// Dropping the future returned by `execute` cancels the execution.
#[async_trait]
pub trait Handler<A>: Send + Sync {
    type Output: Send + 'static;

    fn action_kind(&self) -> &ActionKind;

    async fn execute(&self, action: A) -> Result<Self::Output, HandlerError>;
}

#[async_trait]
impl<A, H> Handler<A> for Arc<H>
where
    A: Send + 'static,
    H: Handler<A> + ?Sized,
{
    type Output = H::Output;

    fn action_kind(&self) -> &ActionKind {
        (**self).action_kind()
    }

    async fn execute(&self, action: A) -> Result<Self::Output, HandlerError> {
        (**self).execute(action).await
    }
}

/// Shared, type-erased handler producing `O` for actions `A`.
pub type SharedHandler<A, O> = Arc<dyn Handler<A, Output = O>>;
