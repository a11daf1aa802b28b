//! 크롤러 User-Agent 시그니처 목록과 분류
//!
//! 시그니처 파일은 한 줄에 하나의 부분 문자열이며, 파일 순서가 곧 우선순위입니다.
//! 목록은 수집 시작 전에 한 번 만들어지고 이후 읽기 전용으로 워커들이 공유합니다.

use std::path::Path;

use hitcount_core::types::{CrawlerMatch, SENTINEL};

use crate::case::fold_case;
use crate::error::LogPipelineError;

/// 시그니처 파일 최대 크기
const MAX_SIGNATURE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Clone)]
struct Signature {
    /// 파일에 적힌 원문 (매치 토큰으로 사용)
    original: String,
    folded: String,
}

/// 순서가 있는 크롤러 시그니처 목록
#[derive(Debug, Clone, Default)]
pub struct CrawlerSignatures {
    signatures: Vec<Signature>,
}

impl CrawlerSignatures {
    /// 시그니처 텍스트를 파싱합니다.
    ///
    /// 각 줄을 트리밍하고, 빈 줄은 건너뜁니다. (빈 시그니처는 모든 User-Agent와 일치하므로)
    pub fn parse(text: &str) -> Self {
        let signatures = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Signature {
                original: line.to_owned(),
                folded: fold_case(line).into_owned(),
            })
            .collect();

        Self { signatures }
    }

    /// 파일에서 시그니처 목록을 로드합니다.
    ///
    /// # Errors
    /// - 파일이 없거나 읽을 수 없는 경우
    /// - 파일이 `MAX_SIGNATURE_FILE_SIZE`를 초과하는 경우
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogPipelineError> {
        let path = path.as_ref();

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| LogPipelineError::SignatureLoad {
                    path: path.display().to_string(),
                    reason: format!("cannot find crawler signature file: {e}"),
                })?;

        if metadata.len() > MAX_SIGNATURE_FILE_SIZE {
            return Err(LogPipelineError::SignatureLoad {
                path: path.display().to_string(),
                reason: format!(
                    "file too large: {} bytes (max: {MAX_SIGNATURE_FILE_SIZE})",
                    metadata.len()
                ),
            });
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            LogPipelineError::SignatureLoad {
                path: path.display().to_string(),
                reason: format!("failed to read file: {e}"),
            }
        })?;

        let signatures = Self::parse(&content);
        tracing::info!(
            path = %path.display(),
            count = signatures.len(),
            "loaded crawler signatures"
        );

        Ok(signatures)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// 시그니처 원문을 파일 순서대로 반환합니다.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(|s| s.original.as_str())
    }

    /// User-Agent를 분류합니다. `None`이면 사람의 요청입니다.
    ///
    /// 1. 비어 있거나 공백뿐이면 [`CrawlerMatch::MissingUserAgent`]
    /// 2. 정확히 `-`이면 [`CrawlerMatch::Sentinel`]
    /// 3. 대소문자를 무시하고 부분 문자열로 포함하는 첫 번째 시그니처
    pub fn classify(&self, user_agent: &str) -> Option<CrawlerMatch> {
        if user_agent.trim().is_empty() {
            return Some(CrawlerMatch::MissingUserAgent);
        }

        if user_agent == SENTINEL {
            return Some(CrawlerMatch::Sentinel);
        }

        let folded = fold_case(user_agent);
        self.signatures
            .iter()
            .find(|signature| folded.contains(signature.folded.as_str()))
            .map(|signature| CrawlerMatch::Signature(signature.original.clone()))
    }
}
