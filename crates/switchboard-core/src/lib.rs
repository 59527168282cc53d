//! switchboard-core
//!
//! Routes typed actions to exactly one of several registered handlers.
//!
//! # モジュール構成
//! - **domain**: ActionKind, Labeled, エラー型（BuildError, DispatchError）
//! - **ports**: Handler trait, MappingRule
//! - **app**: DispatcherBuilder, Dispatcher, RoutingConfig
//! - **impls**: LoggingHandler, FnHandler
//! - **observability**: tracing subscriber の初期化

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use self::app::{Dispatcher, DispatcherBuilder, RoutingConfig};
pub use self::domain::{ActionKind, BuildError, DispatchError, HandlerError, Labeled};
pub use self::ports::{Handler, MappingRule, SharedHandler, rule};
