//! 로그 수집 설정
//!
//! [`IngestConfig`]는 core의 [`IngestSection`](hitcount_core::config::IngestSection)을
//! 기반으로 경로를 `PathBuf`로 바꾸고 워커 수를 확정한 수집 전용 설정입니다.
//!
//! # 사용 예시
//! ```ignore
//! use hitcount_core::config::HitcountConfig;
//! use hitcount_log_pipeline::config::IngestConfig;
//!
//! let core_config = HitcountConfig::default();
//! let config = IngestConfig::from_core(&core_config.ingest);
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;

use hitcount_core::config::IngestSection;
use serde::{Deserialize, Serialize};

/// 로그 수집 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// 액세스 로그 디렉토리
    pub log_dir: PathBuf,
    /// `log_dir` 내 파일 glob 패턴
    pub file_pattern: String,
    /// 크롤러 시그니처 파일
    pub crawler_signatures_path: PathBuf,
    /// 콘텐츠 제외 규칙 파일
    pub content_exclude_path: PathBuf,
    /// 병렬 워커 수 (0 = CPU 수)
    pub workers: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::from_core(&IngestSection::default())
    }
}

impl IngestConfig {
    /// core의 `[ingest]` 섹션에서 수집 설정을 생성합니다.
    pub fn from_core(core: &IngestSection) -> Self {
        Self {
            log_dir: PathBuf::from(&core.log_dir),
            file_pattern: core.file_pattern.clone(),
            crawler_signatures_path: PathBuf::from(&core.crawler_signatures_path),
            content_exclude_path: PathBuf::from(&core.content_exclude_path),
            workers: core.workers,
        }
    }
}

/// 워커 수를 확정합니다. 0이면 사용 가능한 CPU 수(확인 불가 시 1)입니다.
pub fn resolve_workers(workers: usize) -> usize {
    if workers > 0 {
        return workers;
    }
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
