//! 타입별 필드 파서 (타임스탬프, 정수, 실수)
//!
//! 모든 파서는 입력을 트리밍한 뒤 해석하며, 실패 시 트리밍된 원문을 에러에 담습니다.
//! 기본값으로 대체하는 경우는 없습니다.

use chrono::{DateTime, Utc};

use crate::error::RecordError;

/// `$time_local` 형식 (예: `10/Oct/2023:13:55:36 +0000`)
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// `dd/Mon/yyyy:HH:MM:SS +hhmm`의 바이트 길이
const TIMESTAMP_LEN: usize = 26;

/// `$time_local` 값을 UTC 시각으로 변환합니다.
///
/// chrono는 한 자리 숫자와 공백 개수 차이를 허용하므로 고정 폭 형태를 먼저 확인합니다.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    let value = raw.trim();
    if !has_timestamp_shape(value.as_bytes()) {
        return Err(RecordError::MalformedTimestamp {
            raw: value.to_owned(),
        });
    }

    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|_| RecordError::MalformedTimestamp {
            raw: value.to_owned(),
        })
}

/// 구분자 위치, 숫자 자리수, 오프셋 부호를 확인합니다. 월 이름은 chrono가 검증합니다.
fn has_timestamp_shape(bytes: &[u8]) -> bool {
    const DIGITS: [usize; 16] = [0, 1, 7, 8, 9, 10, 12, 13, 15, 16, 18, 19, 22, 23, 24, 25];

    bytes.len() == TIMESTAMP_LEN
        && bytes[2] == b'/'
        && bytes[6] == b'/'
        && bytes[11] == b':'
        && bytes[14] == b':'
        && bytes[17] == b':'
        && bytes[20] == b' '
        && matches!(bytes[21], b'+' | b'-')
        && bytes[3..6].iter().all(u8::is_ascii_alphabetic)
        && DIGITS.iter().all(|&i| bytes[i].is_ascii_digit())
}

/// 부호 있는 정수로 변환합니다.
pub fn parse_integer(raw: &str) -> Result<i64, RecordError> {
    let value = raw.trim();
    value
        .parse::<i64>()
        .map_err(|_| RecordError::MalformedInteger {
            raw: value.to_owned(),
        })
}

/// 음이 아닌 유한 실수로 변환합니다. (`$request_time`)
pub fn parse_float(raw: &str) -> Result<f64, RecordError> {
    let value = raw.trim();
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(number),
        _ => Err(RecordError::MalformedFloat {
            raw: value.to_owned(),
        }),
    }
}
