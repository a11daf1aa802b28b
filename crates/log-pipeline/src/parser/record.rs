//! 검증된 필드로 [`LogRecord`]를 조립합니다.

use hitcount_core::types::{LogRecord, RecordParts, SENTINEL};

use crate::crawler::CrawlerSignatures;
use crate::error::RecordError;

use super::fields::{parse_float, parse_integer, parse_timestamp};
use super::request::RequestLine;
use super::tokenizer::tokenize;

/// 클라이언트가 응답 전에 연결을 끊은 요청의 상태 코드
const BROKEN_REQUEST_STATUS: i64 = 0;

/// broken request를 기록할 때 사용하는 상태 코드
const BROKEN_REQUEST_RECORDED_STATUS: u16 = 500;

/// HTTP 상태 코드로 허용하는 최대값
const MAX_STATUS_CODE: u16 = 999;

/// 액세스 로그 라인 파서
///
/// 크롤러 시그니처 목록을 소유하며 상태를 변경하지 않으므로
/// `Arc`로 감싸 여러 워커가 동시에 사용할 수 있습니다.
#[derive(Debug, Clone, Default)]
pub struct AccessLogParser {
    crawlers: CrawlerSignatures,
}

impl AccessLogParser {
    pub fn new(crawlers: CrawlerSignatures) -> Self {
        Self { crawlers }
    }

    pub fn crawlers(&self) -> &CrawlerSignatures {
        &self.crawlers
    }

    /// 로그 라인 하나를 레코드로 변환합니다.
    ///
    /// 상태 코드가 `000`이면 요청 라인을 파싱하지 않고
    /// method/url/protocol을 `-`로, 상태 코드를 500으로 기록합니다.
    /// 상태 코드가 0이 아니고 요청 필드가 비어 있으면 세 값은 `None`으로 남습니다.
    pub fn parse_line(&self, line: &str) -> Result<LogRecord, RecordError> {
        let fields = tokenize(line)?;

        let status = parse_integer(fields.status)?;
        let (response_code, request) = if status == BROKEN_REQUEST_STATUS {
            let sentinel = RequestLine {
                method: SENTINEL.to_owned(),
                url: SENTINEL.to_owned(),
                protocol: SENTINEL.to_owned(),
            };
            (BROKEN_REQUEST_RECORDED_STATUS, Some(sentinel))
        } else {
            (to_status_code(status, fields.status)?, RequestLine::parse(fields.request)?)
        };

        let time = parse_timestamp(fields.time_local)?;
        let remote_address = fields.remote_addr.trim().to_owned();
        let body_sent_bytes = to_byte_count(fields.body_bytes_sent)?;
        let referrer = fields.http_referer.trim().to_owned();
        let user_agent = fields.http_user_agent.trim().to_owned();
        let request_time_secs = parse_float(fields.request_time)?;

        let crawler = self.crawlers.classify(&user_agent);
        let (method, request_url, protocol) = match request {
            Some(request) => (
                Some(request.method),
                Some(request.url),
                Some(request.protocol),
            ),
            None => (None, None, None),
        };

        Ok(LogRecord::from_parts(RecordParts {
            time,
            remote_address,
            method,
            request_url,
            protocol,
            response_code,
            body_sent_bytes,
            referrer,
            user_agent,
            request_time_secs,
            crawler,
        }))
    }
}

fn to_status_code(status: i64, raw: &str) -> Result<u16, RecordError> {
    u16::try_from(status)
        .ok()
        .filter(|code| *code <= MAX_STATUS_CODE)
        .ok_or_else(|| RecordError::MalformedInteger {
            raw: raw.trim().to_owned(),
        })
}

fn to_byte_count(raw: &str) -> Result<u64, RecordError> {
    let value = parse_integer(raw)?;
    u64::try_from(value).map_err(|_| RecordError::MalformedInteger {
        raw: raw.trim().to_owned(),
    })
}
