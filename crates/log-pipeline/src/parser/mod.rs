//! 액세스 로그 파싱 모듈
//!
//! 라인 하나가 레코드가 되기까지의 단계:
//!
//! ```text
//! raw line -> tokenizer (8 fields) -> fields / request (typed values) -> record (LogRecord)
//! ```
//!
//! 각 단계는 실패 시 [`RecordError`](crate::error::RecordError)를 반환하며 내부에서 복구하지 않습니다.
//! 예외는 상태 코드 `000` (broken request) 한 가지뿐입니다.
//!
//! # 사용 예시
//! ```ignore
//! use hitcount_log_pipeline::crawler::CrawlerSignatures;
//! use hitcount_log_pipeline::parser::AccessLogParser;
//!
//! let parser = AccessLogParser::new(CrawlerSignatures::parse("bot\nspider"));
//! let record = parser.parse_line(
//!     "10/Oct/2023:13:55:36 +0000 | 203.0.113.7 | GET /posts/rust HTTP/1.1 | 200 | 512 | - | Mozilla/5.0 | 0.004",
//! )?;
//! assert_eq!(record.normalized_url(), Some("/posts/rust"));
//! ```

pub mod fields;
pub mod record;
pub mod request;
pub mod tokenizer;

pub use record::AccessLogParser;
pub use request::RequestLine;
pub use tokenizer::{FIELD_COUNT, FIELD_DELIMITER, LOG_FORMAT, RawFields};
