//! Mapping rules: predicates deciding whether a route owns an action.
//!
//! Rules are plain closures. They must be pure; the dispatcher may evaluate
//! the same rule any number of times.

use crate::domain::Labeled;

/// Boxed predicate stored alongside each route.
pub type MappingRule<A> = Box<dyn Fn(&A) -> bool + Send + Sync>;

/// Matches actions whose label equals `label`.
pub fn label_is<A>(label: &str) -> impl Fn(&A) -> bool + Send + Sync + use<A>
where
    A: Labeled + 'static,
{
    let label = label.to_string();
    move |action: &A| action.label() == label
}

/// Matches actions whose label is one of `labels`.
pub fn label_in<A, S>(labels: &[S]) -> impl Fn(&A) -> bool + Send + Sync + use<A, S>
where
    A: Labeled + 'static,
    S: AsRef<str>,
{
    let labels: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
    move |action: &A| labels.iter().any(|l| l == action.label())
}

/// Matches every action. Useful as a trailing catch-all route.
pub fn always<A: 'static>() -> impl Fn(&A) -> bool + Send + Sync + 'static {
    |_: &A| true
}
