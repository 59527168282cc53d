//! ActionKind - dispatcher と handler が合意する action ファミリーのタグ
//!
//! # 命名規約
//! - `.` 区切りの 1 つ以上のセグメント
//! - 各セグメントは空でなく、ASCII 小文字・数字・`_`・`-` のみ
//! - 例: `http`, `acme.http.v1`
//!
//! 検証は生成時に一度だけ行う。dispatch 時に kind を見ることはない。

use std::fmt;
use std::str::FromStr;

use super::errors::BuildError;

/// A validated tag naming the family of actions a dispatcher routes.
///
/// Every handler registered into one dispatcher must declare an equal kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKind(String);

impl ActionKind {
    pub fn new(name: &str) -> Result<Self, BuildError> {
        if !is_valid_name(name) {
            return Err(BuildError::InvalidKind(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
        })
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActionKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ActionKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single("http")]
    #[case::namespaced("acme.http.v1")]
    #[case::underscore("mock_service")]
    #[case::hyphen("mock-service.v2")]
    fn accepts_conventional_names(#[case] name: &str) {
        let kind = ActionKind::new(name).unwrap();
        assert_eq!(kind.as_str(), name);
        assert_eq!(kind.to_string(), name);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank_segment("acme..http")]
    #[case::trailing_dot("http.")]
    #[case::uppercase("HttpAction")]
    #[case::whitespace("http action")]
    #[case::path("acme/http")]
    fn rejects_malformed_names(#[case] name: &str) {
        let err = ActionKind::new(name).unwrap_err();
        assert!(matches!(err, BuildError::InvalidKind(ref n) if n == name));
    }

    #[test]
    fn parses_via_from_str() {
        let kind: ActionKind = "acme.http".parse().unwrap();
        assert_eq!(kind, ActionKind::new("acme.http").unwrap());
        assert!("".parse::<ActionKind>().is_err());
    }
}
