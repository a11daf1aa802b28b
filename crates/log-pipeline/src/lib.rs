#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: 라인 분리, 필드 파서, 요청 라인 파서, 레코드 조립 ([`AccessLogParser`])
//! - [`crawler`]: 크롤러 User-Agent 시그니처 목록과 분류
//! - [`rule`]: 콘텐츠 제외 규칙 파싱과 단락 평가 ([`RuleEngine`])
//! - [`ingest`]: 파일 단위 병렬 수집 ([`LogIngestor`])
//! - [`report`]: 요약, URL 상세, 크롤러 통계 집계
//! - [`config`]: 수집 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! files -> LogIngestor (workers) -> AccessLogParser -> Vec<LogRecord> -> report
//!                                        |                                 |
//!                                 CrawlerSignatures                    RuleEngine
//! ```

mod case;

pub mod config;
pub mod crawler;
pub mod error;
pub mod ingest;
pub mod parser;
pub mod report;
pub mod rule;

// --- 주요 타입 re-export ---

// 설정
pub use config::IngestConfig;

// 에러
pub use error::{LogPipelineError, RecordError, RuleSyntaxError};

// 파서
pub use crawler::CrawlerSignatures;
pub use parser::{AccessLogParser, RequestLine};

// 규칙 엔진
pub use rule::{CheckKind, ContentExcludeRule, ContentRule, RuleEngine, RuleLoader};

// 수집
pub use ingest::LogIngestor;

// 집계
pub use report::{CrawlerStats, Summary, UrlDetails, is_content_hit};
