//! Actions that carry a routing label.
//!
//! The dispatcher itself places no bound on the action type beyond
//! `Send + 'static`; a mapping rule may inspect anything it likes. Labels are
//! simply the most common thing rules look at, so they get a trait.

/// An action that names the backend it is meant for.
///
/// # 使用例
/// ```ignore
/// struct GithubAction;
///
/// impl Labeled for GithubAction {
///     fn label(&self) -> &str {
///         "github"
///     }
/// }
/// ```
pub trait Labeled {
    fn label(&self) -> &str;
}

impl<T: Labeled + ?Sized> Labeled for Box<T> {
    fn label(&self) -> &str {
        (**self).label()
    }
}

impl<T: Labeled + ?Sized> Labeled for &T {
    fn label(&self) -> &str {
        (**self).label()
    }
}

impl Labeled for String {
    fn label(&self) -> &str {
        self
    }
}

impl Labeled for str {
    fn label(&self) -> &str {
        self
    }
}
