//! 규칙 매칭 로직
//!
//! [`ContentRule`]은 URL 하나를 제외할지 판단하는 단위입니다.
//! [`RuleEngine`](super::RuleEngine)은 URL을 한 번만 소문자로 폴딩한 뒤
//! 규칙 목록을 순서대로 평가하며 첫 번째로 일치한 규칙에서 멈춥니다.

use crate::case::fold_case;

use super::types::ContentExcludeRule;

/// URL 제외 여부를 판단하는 규칙
pub trait ContentRule: Send + Sync {
    /// 이미 소문자로 폴딩된 URL이 이 규칙에 걸리면 `true` (콘텐츠가 아님)
    fn excludes_folded(&self, folded_url: &str) -> bool;

    /// URL이 이 규칙에 걸리면 `true`. 호출할 때마다 URL을 폴딩합니다.
    fn excludes(&self, url: &str) -> bool {
        self.excludes_folded(&fold_case(url))
    }
}

impl ContentRule for ContentExcludeRule {
    fn excludes_folded(&self, folded_url: &str) -> bool {
        self.matches_folded(folded_url)
    }
}

impl<R: ContentRule + ?Sized> ContentRule for Box<R> {
    fn excludes_folded(&self, folded_url: &str) -> bool {
        (**self).excludes_folded(folded_url)
    }
}
