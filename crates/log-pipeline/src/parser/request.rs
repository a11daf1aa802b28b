//! `$request` 필드 파서
//!
//! URL에 인코딩되지 않은 공백이 섞여 있어도 처리할 수 있도록
//! 단순 3분할 대신 첫 번째/마지막 공백 위치로 메서드와 프로토콜을 잘라냅니다.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error::RecordError;

/// 파싱된 요청 라인 (`METHOD URL PROTOCOL`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    /// 퍼센트 디코딩된 URL
    pub url: String,
    pub protocol: String,
}

impl RequestLine {
    /// 요청 라인을 파싱합니다.
    ///
    /// - 트리밍 후 비어 있거나 공백이 전혀 없으면 `Ok(None)`
    /// - 첫 공백과 마지막 공백이 같으면 (토큰 2개) [`RecordError::MalformedRequestLine`]
    pub fn parse(raw: &str) -> Result<Option<Self>, RecordError> {
        let request = raw.trim();
        if request.is_empty() {
            return Ok(None);
        }

        let (Some(first_space), Some(last_space)) = (request.find(' '), request.rfind(' ')) else {
            return Ok(None);
        };

        if first_space >= last_space || first_space == 0 || last_space == request.len() - 1 {
            return Err(RecordError::MalformedRequestLine {
                raw: raw.to_owned(),
            });
        }

        let method = request[..first_space].trim();
        let url = request[first_space + 1..last_space].trim();
        let protocol = request[last_space + 1..].trim();

        Ok(Some(Self {
            method: method.to_owned(),
            url: decode_url(url).into_owned(),
            protocol: protocol.to_owned(),
        }))
    }
}

/// 폼 인코딩 규칙으로 URL을 디코딩합니다. (`+`는 공백, `%XX`는 바이트)
///
/// 잘못된 `%` 시퀀스는 그대로 두고, UTF-8이 아닌 바이트열은 대체 문자로 바꿉니다.
pub fn decode_url(url: &str) -> Cow<'_, str> {
    if !url.contains(['+', '%']) {
        return Cow::Borrowed(url);
    }

    let spaced = url.replace('+', " ");
    Cow::Owned(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}
