//! 로그 라인을 8개의 원시 필드로 분리합니다.
//!
//! 필드 트리밍은 하지 않습니다. 각 필드 파서가 자신의 입력을 트리밍합니다.

use crate::error::RecordError;

/// 필드 구분자 (공백, 파이프, 공백)
pub const FIELD_DELIMITER: &str = " | ";

/// 라인 하나의 필드 수
pub const FIELD_COUNT: usize = 8;

/// nginx `log_format` 스키마
pub const LOG_FORMAT: &str = "$time_local | $remote_addr | $request | $status | $body_bytes_sent | $http_referer | $http_user_agent | $request_time";

/// 분리된 원시 필드 (원본 라인을 빌림)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub time_local: &'a str,
    pub remote_addr: &'a str,
    pub request: &'a str,
    pub status: &'a str,
    pub body_bytes_sent: &'a str,
    pub http_referer: &'a str,
    pub http_user_agent: &'a str,
    pub request_time: &'a str,
}

/// 라인을 [`FIELD_DELIMITER`]로 분리합니다.
///
/// 분리 결과가 정확히 [`FIELD_COUNT`]개가 아니면 [`RecordError::MalformedLine`]을 반환합니다.
pub fn tokenize(line: &str) -> Result<RawFields<'_>, RecordError> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    let &[
        time_local,
        remote_addr,
        request,
        status,
        body_bytes_sent,
        http_referer,
        http_user_agent,
        request_time,
    ] = parts.as_slice()
    else {
        return Err(RecordError::MalformedLine {
            fields: parts.len(),
            raw: line.to_owned(),
        });
    };

    Ok(RawFields {
        time_local,
        remote_addr,
        request,
        status,
        body_bytes_sent,
        http_referer,
        http_user_agent,
        request_time,
    })
}
