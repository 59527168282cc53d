//! App - routing table の構築と dispatch
//!
//! # 主要コンポーネント
//! - **DispatcherBuilder**: route の登録と構築時検証
//! - **Dispatcher**: first-match で handler に委譲する proxy handler
//! - **RoutingConfig**: TOML から routing table を組み立てる

pub mod builder;
pub mod config;
pub mod dispatcher;

// 主要な型を再エクスポート
pub use self::builder::DispatcherBuilder;
pub use self::config::{ConfigError, RouteConfig, RoutingConfig};
pub use self::dispatcher::Dispatcher;
