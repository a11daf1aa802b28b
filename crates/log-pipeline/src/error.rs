//! 로그 파이프라인 에러 타입
//!
//! - [`RecordError`]: 라인 하나를 레코드로 변환하다 실패한 경우 (배치 정책은 호출자가 결정)
//! - [`RuleSyntaxError`]: 콘텐츠 제외 규칙 한 줄의 문법 오류
//! - [`LogPipelineError`]: 파이프라인 전체 에러. 수집 중 실패는 파일/라인 위치를 함께 담습니다.
//!
//! `From<LogPipelineError> for HitcountError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use hitcount_core::error::{HitcountError, PipelineError};

use crate::parser::tokenizer::LOG_FORMAT;

/// 로그 라인 하나의 파싱 실패
///
/// 모든 변형은 문제가 된 원문 텍스트를 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// 필드 개수가 8개가 아님
    #[error("malformed line: expected 8 fields '{format}', got {fields}", format = LOG_FORMAT)]
    MalformedLine {
        /// 실제로 분리된 필드 수
        fields: usize,
        /// 원본 라인
        raw: String,
    },

    /// `dd/Mon/yyyy:HH:MM:SS ±hhmm` 형식이 아닌 타임스탬프
    #[error("malformed timestamp: '{raw}' does not match 'dd/Mon/yyyy:HH:MM:SS +hhmm'")]
    MalformedTimestamp { raw: String },

    /// 정수로 해석할 수 없는 값
    #[error("malformed integer: expected an integer but got '{raw}'")]
    MalformedInteger { raw: String },

    /// 음이 아닌 실수로 해석할 수 없는 값
    #[error("malformed float: expected a non-negative number but got '{raw}'")]
    MalformedFloat { raw: String },

    /// `METHOD URL PROTOCOL` 형태가 아닌 요청 라인
    #[error("malformed request line: expected 'METHOD URL PROTOCOL' but got '{raw}'")]
    MalformedRequestLine { raw: String },
}

impl RecordError {
    /// 에러를 일으킨 원문 텍스트
    pub fn raw(&self) -> &str {
        match self {
            Self::MalformedLine { raw, .. }
            | Self::MalformedTimestamp { raw }
            | Self::MalformedInteger { raw }
            | Self::MalformedFloat { raw }
            | Self::MalformedRequestLine { raw } => raw,
        }
    }
}

/// 콘텐츠 제외 규칙 한 줄의 문법 오류
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleSyntaxError {
    #[error("rule cannot be empty")]
    Empty,

    #[error("rule needs a check type and a match pattern")]
    TooShort,

    #[error("rule cannot have an empty or whitespace-only match pattern")]
    BlankPattern,

    #[error("unknown check type '{0}', supported types are '=', '^', '$', '~'")]
    UnknownCheckType(char),
}

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 수집 중 라인 파싱 실패 (수집 전체가 중단됨)
    #[error("{path}:{line}: {source}")]
    Record {
        /// 로그 파일 경로
        path: String,
        /// 1부터 시작하는 라인 번호
        line: usize,
        /// 라인 파싱 에러 (원문 포함)
        source: RecordError,
    },

    /// 콘텐츠 제외 규칙 문법 오류
    #[error("malformed rule at line {line}: {reason}: '{raw}'")]
    MalformedRule {
        /// 1부터 시작하는 규칙 파일 라인 번호
        line: usize,
        /// 문제가 된 규칙 원문
        raw: String,
        /// 문법 오류 종류
        #[source]
        reason: RuleSyntaxError,
    },

    /// 규칙 파일 로딩 실패
    #[error("rule load error: {path}: {reason}")]
    RuleLoad {
        /// 규칙 파일 경로
        path: String,
        /// 로딩 실패 사유
        reason: String,
    },

    /// 크롤러 시그니처 파일 로딩 실패
    #[error("crawler signature load error: {path}: {reason}")]
    SignatureLoad {
        /// 시그니처 파일 경로
        path: String,
        /// 로딩 실패 사유
        reason: String,
    },

    /// 로그 파일 읽기 실패
    #[error("file read error: {path}: {reason}")]
    FileRead {
        /// 로그 파일 경로
        path: String,
        /// 에러 사유
        reason: String,
    },

    /// 워커 태스크 실패 (panic, 취소 등)
    #[error("worker error: {0}")]
    Worker(String),
}

impl LogPipelineError {
    /// 입력 데이터(로그 라인, 규칙) 자체가 잘못되어 발생한 에러인지 여부
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Record { .. } | Self::MalformedRule { .. })
    }
}

impl From<LogPipelineError> for HitcountError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::MalformedRule { .. }
            | LogPipelineError::RuleLoad { .. }
            | LogPipelineError::SignatureLoad { .. } => {
                HitcountError::Pipeline(PipelineError::Rules(err.to_string()))
            }
            _ => HitcountError::Pipeline(PipelineError::Ingest(err.to_string())),
        }
    }
}
