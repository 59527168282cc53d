//! Domain model: action kinds, labeled actions, and the error taxonomy.

pub mod action;
pub mod errors;
pub mod kind;

pub use self::action::Labeled;
pub use self::errors::{BuildError, DispatchError, HandlerError, HandlerPanicked};
pub use self::kind::ActionKind;
