//! 콘텐츠 제외 규칙 데이터 타입
//!
//! 규칙 파일의 한 줄이 [`ContentExcludeRule`] 하나에 대응합니다.
//! 첫 글자가 검사 종류, 나머지가 패턴입니다.
//!
//! | 접두사 | 의미 (대소문자 무시) |
//! |---|---|
//! | `=` | URL이 패턴과 같음 |
//! | `^` | URL이 패턴으로 시작 |
//! | `$` | URL이 패턴으로 끝남 |
//! | `~` | URL이 패턴을 포함 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::case::fold_case;
use crate::error::RuleSyntaxError;

/// 규칙 검사 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Equals,
    StartsWith,
    EndsWith,
    Contains,
}

impl CheckKind {
    /// 규칙 접두사 문자로부터 검사 종류를 결정합니다.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            '=' => Some(Self::Equals),
            '^' => Some(Self::StartsWith),
            '$' => Some(Self::EndsWith),
            '~' => Some(Self::Contains),
            _ => None,
        }
    }

    pub fn prefix(self) -> char {
        match self {
            Self::Equals => '=',
            Self::StartsWith => '^',
            Self::EndsWith => '$',
            Self::Contains => '~',
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals => write!(f, "equals"),
            Self::StartsWith => write!(f, "starts_with"),
            Self::EndsWith => write!(f, "ends_with"),
            Self::Contains => write!(f, "contains"),
        }
    }
}

/// 콘텐츠 제외 규칙 (검사 종류 + 패턴)
///
/// 패턴은 파일에 적힌 그대로 보관하고, 비교용으로 소문자 폴딩한 사본을 함께 가집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentExcludeRule {
    kind: CheckKind,
    pattern: String,
    folded: String,
}

impl ContentExcludeRule {
    pub fn new(kind: CheckKind, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let folded = fold_case(&pattern).into_owned();
        Self {
            kind,
            pattern,
            folded,
        }
    }

    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 소문자로 폴딩된 URL에 대해 규칙을 평가합니다.
    pub(crate) fn matches_folded(&self, folded_url: &str) -> bool {
        let pattern = self.folded.as_str();
        match self.kind {
            CheckKind::Equals => folded_url == pattern,
            CheckKind::StartsWith => folded_url.starts_with(pattern),
            CheckKind::EndsWith => folded_url.ends_with(pattern),
            CheckKind::Contains => folded_url.contains(pattern),
        }
    }
}

impl FromStr for ContentExcludeRule {
    type Err = RuleSyntaxError;

    /// 규칙 한 줄을 파싱합니다. 주석/빈 줄 처리는 [`RuleLoader`](super::RuleLoader)의 몫입니다.
    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        if rule.trim().is_empty() {
            return Err(RuleSyntaxError::Empty);
        }

        let mut chars = rule.chars();
        let Some(prefix) = chars.next() else {
            return Err(RuleSyntaxError::Empty);
        };
        let pattern = chars.as_str();

        if pattern.is_empty() {
            return Err(RuleSyntaxError::TooShort);
        }

        if pattern.trim().is_empty() {
            return Err(RuleSyntaxError::BlankPattern);
        }

        let kind = CheckKind::from_prefix(prefix).ok_or(RuleSyntaxError::UnknownCheckType(prefix))?;
        Ok(Self::new(kind, pattern))
    }
}

/// 규칙 파일에 적는 한 줄 형태로 출력합니다. (예: `^/feed`)
impl fmt::Display for ContentExcludeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.pattern)
    }
}
