//! 에러 타입: 도메인별 에러 정의

/// hitcount 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum HitcountError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파이프라인 처리 에러 (수집, 규칙 로딩)
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파이프라인 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 로그 수집 실패 (잘못된 라인, 파일 읽기 실패 등)
    #[error("ingest failed: {0}")]
    Ingest(String),

    /// 크롤러 시그니처 / 콘텐츠 제외 규칙 로딩 실패
    #[error("rules failed: {0}")]
    Rules(String),
}
