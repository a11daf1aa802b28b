#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod metrics;
pub mod types;
pub mod url;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, HitcountError, PipelineError};

// 설정
pub use config::HitcountConfig;

// 도메인 타입
pub use types::{CrawlerMatch, LogRecord, RecordParts};

// URL 정규화
pub use url::normalize_url;
