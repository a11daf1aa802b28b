//! 규칙 파일 로더 -- 콘텐츠 제외 규칙 목록을 읽어 파싱합니다.
//!
//! 빈 줄과 `//`로 시작하는 줄은 건너뜁니다.
//! 잘못된 규칙이 하나라도 있으면 그 줄 번호와 함께 즉시 실패합니다.

use std::path::Path;

use crate::error::LogPipelineError;

use super::types::ContentExcludeRule;

/// 규칙 파일 로더 설정
const MAX_RULE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB
const MAX_RULES_COUNT: usize = 10_000;

/// 주석 접두사
const COMMENT_PREFIX: &str = "//";

/// 규칙 파일 로더
pub struct RuleLoader;

impl RuleLoader {
    /// 규칙 파일을 로드합니다.
    ///
    /// # Errors
    /// - 파일이 없거나 읽을 수 없는 경우 (`RuleLoad`)
    /// - 파일이 `MAX_RULE_FILE_SIZE`를 초과하는 경우 (`RuleLoad`)
    /// - 규칙 문법 오류 (`MalformedRule`)
    pub async fn load_file(
        path: impl AsRef<Path>,
    ) -> Result<Vec<ContentExcludeRule>, LogPipelineError> {
        let path = path.as_ref();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| LogPipelineError::RuleLoad {
                path: path.display().to_string(),
                reason: format!("cannot find content exclude file: {e}"),
            })?;

        if metadata.len() > MAX_RULE_FILE_SIZE {
            return Err(LogPipelineError::RuleLoad {
                path: path.display().to_string(),
                reason: format!(
                    "file too large: {} bytes (max: {MAX_RULE_FILE_SIZE})",
                    metadata.len()
                ),
            });
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LogPipelineError::RuleLoad {
                    path: path.display().to_string(),
                    reason: format!("failed to read file: {e}"),
                })?;

        let rules = Self::parse_source(&content, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            count = rules.len(),
            "loaded content exclude rules"
        );

        Ok(rules)
    }

    /// 규칙 목록 텍스트를 파싱합니다.
    ///
    /// 첫 번째 오류에서 중단하며, 에러에는 1부터 시작하는 줄 번호가 담깁니다.
    pub fn parse_str(content: &str) -> Result<Vec<ContentExcludeRule>, LogPipelineError> {
        Self::parse_source(content, "(inline)")
    }

    /// `source`는 규칙 개수 초과 에러에 표시할 출처입니다.
    fn parse_source(
        content: &str,
        source: &str,
    ) -> Result<Vec<ContentExcludeRule>, LogPipelineError> {
        let mut rules = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;

            if line.trim().is_empty() {
                continue;
            }

            if line.starts_with(COMMENT_PREFIX) {
                tracing::trace!(line = line_number, "skipping comment");
                continue;
            }

            let rule = line
                .parse::<ContentExcludeRule>()
                .map_err(|reason| LogPipelineError::MalformedRule {
                    line: line_number,
                    raw: line.to_owned(),
                    reason,
                })?;
            rules.push(rule);

            if rules.len() > MAX_RULES_COUNT {
                return Err(LogPipelineError::RuleLoad {
                    path: source.to_owned(),
                    reason: format!("too many rules: max {MAX_RULES_COUNT}"),
                });
            }
        }

        Ok(rules)
    }
}
