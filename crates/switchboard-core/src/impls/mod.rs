//! Impls - 汎用の Handler 実装
//!
//! # 含まれる実装
//! - **LoggingHandler**: 任意の handler をラップして送信・結果をログに出す
//! - **FnHandler**: async クロージャを handler として使う

pub mod fn_handler;
pub mod logging;

pub use self::fn_handler::FnHandler;
pub use self::logging::LoggingHandler;
