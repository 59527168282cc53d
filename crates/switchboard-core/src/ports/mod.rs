//! Ports - dispatcher が外部と接する境界
//!
//! - [`Handler`]: action を実行する backend（外部コラボレーター）
//! - [`MappingRule`]: route がその action を担当するかを判定する述語

pub mod handler;
pub mod rule;

pub use self::handler::{Handler, SharedHandler};
pub use self::rule::MappingRule;
