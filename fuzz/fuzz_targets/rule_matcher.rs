#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use hitcount_log_pipeline::{CheckKind, ContentExcludeRule, ContentRule, RuleEngine};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 규칙 목록 (최대 16개로 제한)
    rules: Vec<FuzzRule>,
    url: String,
}

#[derive(Arbitrary, Debug)]
struct FuzzRule {
    kind: FuzzKind,
    pattern: String,
}

#[derive(Arbitrary, Debug)]
enum FuzzKind {
    Equals,
    StartsWith,
    EndsWith,
    Contains,
}

impl FuzzKind {
    fn to_check_kind(&self) -> CheckKind {
        match self {
            FuzzKind::Equals => CheckKind::Equals,
            FuzzKind::StartsWith => CheckKind::StartsWith,
            FuzzKind::EndsWith => CheckKind::EndsWith,
            FuzzKind::Contains => CheckKind::Contains,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let rules: Vec<ContentExcludeRule> = input
        .rules
        .iter()
        .take(16)
        .filter(|r| !r.pattern.trim().is_empty())
        .map(|r| ContentExcludeRule::new(r.kind.to_check_kind(), r.pattern.clone()))
        .collect();

    let excluded_by_any = rules.iter().any(|r| r.excludes(&input.url));
    let engine = RuleEngine::new(rules);

    // 단락 평가 결과는 전체 평가와 같아야 함
    assert_eq!(engine.is_content(&input.url), !excluded_by_any);
});
