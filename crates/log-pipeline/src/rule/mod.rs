//! 콘텐츠 제외 규칙 엔진
//!
//! URL이 "콘텐츠"(사람이 읽는 페이지)인지, 정적 리소스/피드/노이즈인지 판단합니다.
//!
//! # 규칙 형식
//! ```text
//! // 정적 리소스
//! ^/static/
//! $.css
//! =/feed
//! ~wp-login
//! ```
//!
//! # 아키텍처
//! - [`RuleEngine`]: 규칙 목록 보관 및 단락 평가
//! - [`loader`]: 규칙 파일 로딩 및 줄 단위 파싱
//! - [`matcher`]: 규칙 하나의 매칭 로직 ([`ContentRule`])
//! - [`types`]: 규칙 데이터 구조 정의

pub mod loader;
pub mod matcher;
pub mod types;

pub use loader::RuleLoader;
pub use matcher::ContentRule;
pub use types::{CheckKind, ContentExcludeRule};

use std::path::Path;

use crate::case::fold_case;
use crate::error::LogPipelineError;

/// 규칙 엔진 -- 순서가 있는 제외 규칙 목록을 소유합니다.
///
/// 생성 후에는 읽기 전용이므로 여러 스레드에서 공유해도 안전합니다.
///
/// # 사용 예시
/// ```ignore
/// let engine = RuleEngine::load("content-exclude.txt").await?;
/// if engine.is_content("/posts/rust") {
///     // 콘텐츠 조회수 집계
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RuleEngine<R = ContentExcludeRule> {
    rules: Vec<R>,
}

impl RuleEngine<ContentExcludeRule> {
    /// 규칙 파일에서 엔진을 생성합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogPipelineError> {
        let rules = RuleLoader::load_file(path).await?;
        Ok(Self::new(rules))
    }

    /// 규칙 목록 텍스트에서 엔진을 생성합니다.
    pub fn parse(content: &str) -> Result<Self, LogPipelineError> {
        let rules = RuleLoader::parse_str(content)?;
        Ok(Self::new(rules))
    }
}

impl<R: ContentRule> RuleEngine<R> {
    pub fn new(rules: Vec<R>) -> Self {
        metrics::gauge!(hitcount_core::metrics::RULES_LOADED).set(rules.len() as f64);
        Self { rules }
    }

    /// URL이 콘텐츠인지 판단합니다.
    ///
    /// URL은 한 번만 폴딩됩니다. 규칙 중 하나라도 일치하면 즉시 `false`를 반환하며
    /// 이후 규칙은 평가하지 않습니다.
    pub fn is_content(&self, url: &str) -> bool {
        let folded = fold_case(url);
        !self.rules.iter().any(|rule| rule.excludes_folded(&folded))
    }

    pub fn rules(&self) -> &[R] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<R: ContentRule> Default for RuleEngine<R> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}
