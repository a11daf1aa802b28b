//! 도메인 타입: 액세스 로그 레코드와 크롤러 분류 결과
//!
//! 로그 파이프라인이 생성하고 리포트 계층이 소비하는 데이터 구조를 정의합니다.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::url::normalize_url;

/// 요청 라인이 없는 "broken request"에 사용하는 센티널 값
pub const SENTINEL: &str = "-";

/// 크롤러로 분류된 이유
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "token", rename_all = "snake_case")]
pub enum CrawlerMatch {
    /// User-Agent가 비어 있음 (매치 토큰 없음)
    MissingUserAgent,
    /// User-Agent가 센티널 `-`
    Sentinel,
    /// 시그니처 목록의 항목과 일치 (대소문자 무시 부분 문자열)
    Signature(String),
}

impl CrawlerMatch {
    /// 매치 토큰을 반환합니다. User-Agent가 비어 있으면 `None`입니다.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MissingUserAgent => None,
            Self::Sentinel => Some(SENTINEL),
            Self::Signature(signature) => Some(signature),
        }
    }
}

impl fmt::Display for CrawlerMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUserAgent => write!(f, "(empty user agent)"),
            Self::Sentinel => write!(f, "{SENTINEL}"),
            Self::Signature(signature) => write!(f, "{signature}"),
        }
    }
}

/// [`LogRecord`] 생성에 필요한 필드 묶음
///
/// 파서가 모든 필드를 검증한 뒤 [`LogRecord::from_parts`]로 넘깁니다.
#[derive(Debug, Clone)]
pub struct RecordParts {
    pub time: DateTime<Utc>,
    pub remote_address: String,
    pub method: Option<String>,
    pub request_url: Option<String>,
    pub protocol: Option<String>,
    pub response_code: u16,
    pub body_sent_bytes: u64,
    pub referrer: String,
    pub user_agent: String,
    pub request_time_secs: f64,
    pub crawler: Option<CrawlerMatch>,
}

/// 액세스 로그 레코드
///
/// 8개 필드가 모두 검증된 경우에만 생성되며 생성 후에는 변경되지 않습니다.
/// 정규화 URL은 처음 조회할 때 한 번 계산되어 캐싱됩니다.
///
/// `method`/`request_url`/`protocol`:
/// - `None`: 요청 필드가 비어 있었음 (상태 코드 ≠ 0)
/// - `Some("-")`: broken request (원본 상태 코드 0, 500으로 기록)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    time: DateTime<Utc>,
    remote_address: String,
    method: Option<String>,
    request_url: Option<String>,
    protocol: Option<String>,
    response_code: u16,
    body_sent_bytes: u64,
    referrer: String,
    user_agent: String,
    request_time_secs: f64,
    crawler: Option<CrawlerMatch>,
    #[serde(skip)]
    normalized_url: OnceLock<String>,
}

impl LogRecord {
    /// 검증된 필드로 레코드를 생성합니다.
    pub fn from_parts(parts: RecordParts) -> Self {
        Self {
            time: parts.time,
            remote_address: parts.remote_address,
            method: parts.method,
            request_url: parts.request_url,
            protocol: parts.protocol,
            response_code: parts.response_code,
            body_sent_bytes: parts.body_sent_bytes,
            referrer: parts.referrer,
            user_agent: parts.user_agent,
            request_time_secs: parts.request_time_secs,
            crawler: parts.crawler,
            normalized_url: OnceLock::new(),
        }
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn remote_address(&self) -> &str {
        &self.remote_address
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub fn response_code(&self) -> u16 {
        self.response_code
    }

    pub fn body_sent_bytes(&self) -> u64 {
        self.body_sent_bytes
    }

    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn request_time_secs(&self) -> f64 {
        self.request_time_secs
    }

    /// 크롤러 분류 결과. `None`이면 사람의 요청입니다.
    pub fn crawler(&self) -> Option<&CrawlerMatch> {
        self.crawler.as_ref()
    }

    /// 크롤러(자동화 트래픽)로 분류되었는지 여부
    pub fn is_ignored(&self) -> bool {
        self.crawler.is_some()
    }

    /// 크롤러로 분류된 경우 일치한 시그니처 또는 센티널
    pub fn ignore_match(&self) -> Option<&str> {
        self.crawler.as_ref().and_then(CrawlerMatch::token)
    }

    /// 정규화된 요청 URL (집계 키). 요청 URL이 없으면 `None`입니다.
    ///
    /// 최초 호출 시 계산 후 캐싱하며, `OnceLock`이므로 여러 스레드에서 동시에 읽어도 안전합니다.
    pub fn normalized_url(&self) -> Option<&str> {
        let url = self.request_url.as_deref()?;
        Some(
            self.normalized_url
                .get_or_init(|| normalize_url(url).to_owned())
                .as_str(),
        )
    }
}

// 정규화 캐시 상태는 비교에서 제외합니다.
impl PartialEq for LogRecord {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
            && self.remote_address == other.remote_address
            && self.method == other.method
            && self.request_url == other.request_url
            && self.protocol == other.protocol
            && self.response_code == other.response_code
            && self.body_sent_bytes == other.body_sent_bytes
            && self.referrer == other.referrer
            && self.user_agent == other.user_agent
            && self.request_time_secs == other.request_time_secs
            && self.crawler == other.crawler
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{} {} {}\" {} {}",
            self.time.format("%Y-%m-%dT%H:%M:%SZ"),
            self.remote_address,
            self.method.as_deref().unwrap_or(""),
            self.request_url.as_deref().unwrap_or(""),
            self.protocol.as_deref().unwrap_or(""),
            self.response_code,
            self.body_sent_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parts(url: Option<&str>, crawler: Option<CrawlerMatch>) -> RecordParts {
        RecordParts {
            time: Utc.with_ymd_and_hms(2023, 10, 10, 13, 55, 36).unwrap(),
            remote_address: "203.0.113.7".to_owned(),
            method: url.map(|_| "GET".to_owned()),
            request_url: url.map(str::to_owned),
            protocol: url.map(|_| "HTTP/1.1".to_owned()),
            response_code: 200,
            body_sent_bytes: 512,
            referrer: "-".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            request_time_secs: 0.004,
            crawler,
        }
    }

    #[test]
    fn normalized_url_is_derived_from_request_url() {
        let record = LogRecord::from_parts(parts(Some("/posts/rust/?ref=rss"), None));
        assert_eq!(record.normalized_url(), Some("/posts/rust"));
        // 두 번째 호출은 캐시된 값을 반환
        assert_eq!(record.normalized_url(), Some("/posts/rust"));
    }

    #[test]
    fn normalized_url_absent_without_request() {
        let record = LogRecord::from_parts(parts(None, None));
        assert_eq!(record.normalized_url(), None);
    }

    #[test]
    fn crawler_accessors() {
        let human = LogRecord::from_parts(parts(Some("/"), None));
        assert!(!human.is_ignored());
        assert_eq!(human.ignore_match(), None);

        let empty = LogRecord::from_parts(parts(Some("/"), Some(CrawlerMatch::MissingUserAgent)));
        assert!(empty.is_ignored());
        assert_eq!(empty.ignore_match(), None);

        let sentinel = LogRecord::from_parts(parts(Some("/"), Some(CrawlerMatch::Sentinel)));
        assert_eq!(sentinel.ignore_match(), Some("-"));

        let bot = LogRecord::from_parts(parts(
            Some("/"),
            Some(CrawlerMatch::Signature("bot".to_owned())),
        ));
        assert_eq!(bot.ignore_match(), Some("bot"));
    }

    #[test]
    fn equality_ignores_normalization_cache() {
        let a = LogRecord::from_parts(parts(Some("/a/"), None));
        let b = a.clone();
        let _ = a.normalized_url();
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_without_cache() {
        let record = LogRecord::from_parts(parts(
            Some("/a"),
            Some(CrawlerMatch::Signature("bot".to_owned())),
        ));
        let _ = record.normalized_url();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("normalized_url").is_none());
        assert_eq!(json["crawler"]["kind"], "signature");
        assert_eq!(json["crawler"]["token"], "bot");
    }
}
