//! 설정 관리: hitcount.toml 파싱 및 런타임 설정
//!
//! [`HitcountConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`HITCOUNT_INGEST_LOG_DIR=/srv/logs` 형식)
//! 3. 설정 파일 (`hitcount.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), hitcount_core::error::HitcountError> {
//! use hitcount_core::config::HitcountConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = HitcountConfig::load("hitcount.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = HitcountConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, HitcountError};

/// 워커 수 상한 (0은 CPU 수만큼 자동 결정)
pub const MAX_WORKERS: usize = 1024;

/// hitcount 통합 설정
///
/// `hitcount.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitcountConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 로그 수집 설정
    #[serde(default)]
    pub ingest: IngestSection,
    /// 리포트 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl HitcountConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, HitcountError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, HitcountError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HitcountError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                HitcountError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, HitcountError> {
        toml::from_str(toml_str).map_err(|e| {
            HitcountError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `HITCOUNT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "HITCOUNT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "HITCOUNT_GENERAL_LOG_FORMAT");

        // Ingest
        override_string(&mut self.ingest.log_dir, "HITCOUNT_INGEST_LOG_DIR");
        override_string(&mut self.ingest.file_pattern, "HITCOUNT_INGEST_FILE_PATTERN");
        override_string(
            &mut self.ingest.crawler_signatures_path,
            "HITCOUNT_INGEST_CRAWLER_SIGNATURES_PATH",
        );
        override_string(
            &mut self.ingest.content_exclude_path,
            "HITCOUNT_INGEST_CONTENT_EXCLUDE_PATH",
        );
        override_usize(&mut self.ingest.workers, "HITCOUNT_INGEST_WORKERS");

        // Report
        override_usize(&mut self.report.top_n, "HITCOUNT_REPORT_TOP_N");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), HitcountError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        let required_paths = [
            ("ingest.log_dir", &self.ingest.log_dir),
            ("ingest.file_pattern", &self.ingest.file_pattern),
            (
                "ingest.crawler_signatures_path",
                &self.ingest.crawler_signatures_path,
            ),
            ("ingest.content_exclude_path", &self.ingest.content_exclude_path),
        ];
        for (field, value) in required_paths {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: "must not be empty".to_owned(),
                }
                .into());
            }
        }

        if self.ingest.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidValue {
                field: "ingest.workers".to_owned(),
                reason: format!("must be 0-{MAX_WORKERS} (0 = one per CPU)"),
            }
            .into());
        }

        if self.report.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.top_n".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 로그 수집 설정 (`[ingest]` 섹션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// 액세스 로그 파일이 있는 디렉토리
    pub log_dir: String,
    /// `log_dir` 내에서 수집할 파일 glob 패턴
    pub file_pattern: String,
    /// 크롤러 User-Agent 시그니처 목록 파일 (한 줄에 하나)
    pub crawler_signatures_path: String,
    /// 콘텐츠 제외 규칙 파일
    pub content_exclude_path: String,
    /// 병렬 워커 수 (0 = CPU 수)
    pub workers: usize,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            log_dir: "/var/log/nginx".to_owned(),
            file_pattern: "access.log*".to_owned(),
            crawler_signatures_path: "crawler-user-agents.txt".to_owned(),
            content_exclude_path: "content-exclude.txt".to_owned(),
            workers: 0,
        }
    }
}

/// 리포트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 상위 URL 목록 크기
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_n: 15 }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = HitcountConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.ingest.file_pattern, "access.log*");
        assert_eq!(config.ingest.workers, 0);
        assert_eq!(config.report.top_n, 15);
    }

    #[test]
    fn default_config_passes_validation() {
        let config = HitcountConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = HitcountConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.ingest.log_dir, "/var/log/nginx");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[ingest]
log_dir = "/srv/nginx"
"#;
        let config = HitcountConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.ingest.log_dir, "/srv/nginx");
        assert_eq!(config.ingest.file_pattern, "access.log*");
    }

    #[test]
    fn from_str_full_toml() {
        let toml = r#"
[general]
log_level = "warn"
log_format = "json"

[ingest]
log_dir = "/data/logs"
file_pattern = "site.access.log*"
crawler_signatures_path = "/etc/hitcount/crawlers.txt"
content_exclude_path = "/etc/hitcount/exclude.txt"
workers = 4

[report]
top_n = 30
"#;
        let config = HitcountConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.ingest.file_pattern, "site.access.log*");
        assert_eq!(config.ingest.workers, 4);
        assert_eq!(config.report.top_n, 30);
        config.validate().unwrap();
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let result = HitcountConfig::parse("invalid = [[[toml");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            HitcountError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = HitcountConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = HitcountConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_blank_paths() {
        let mut config = HitcountConfig::default();
        config.ingest.content_exclude_path = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content_exclude_path"));
    }

    #[test]
    fn validate_rejects_too_many_workers() {
        let mut config = HitcountConfig::default();
        config.ingest.workers = MAX_WORKERS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let mut config = HitcountConfig::default();
        config.report.top_n = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: #[serial]로 환경변수를 건드리는 테스트끼리 동시에 실행되지 않습니다.
        unsafe { std::env::set_var("TEST_HITCOUNT_STR", "overridden") };
        override_string(&mut val, "TEST_HITCOUNT_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_HITCOUNT_STR") };
    }

    #[test]
    #[serial]
    fn env_override_usize_invalid_keeps_original() {
        let mut val = 4;
        // SAFETY: #[serial]로 환경변수를 건드리는 테스트끼리 동시에 실행되지 않습니다.
        unsafe { std::env::set_var("TEST_HITCOUNT_USIZE_BAD", "many") };
        override_usize(&mut val, "TEST_HITCOUNT_USIZE_BAD");
        assert_eq!(val, 4); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_HITCOUNT_USIZE_BAD") };
    }

    #[test]
    #[serial]
    fn env_overrides_apply_to_sections() {
        let mut config = HitcountConfig::default();
        // SAFETY: #[serial]로 환경변수를 건드리는 테스트끼리 동시에 실행되지 않습니다.
        unsafe {
            std::env::set_var("HITCOUNT_INGEST_LOG_DIR", "/tmp/nginx");
            std::env::set_var("HITCOUNT_REPORT_TOP_N", "5");
        }
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var("HITCOUNT_INGEST_LOG_DIR");
            std::env::remove_var("HITCOUNT_REPORT_TOP_N");
        }
        assert_eq!(config.ingest.log_dir, "/tmp/nginx");
        assert_eq!(config.report.top_n, 5);
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_HITCOUNT_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = HitcountConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = HitcountConfig::parse(&toml_str).unwrap();
        assert_eq!(config.ingest.log_dir, parsed.ingest.log_dir);
        assert_eq!(config.report.top_n, parsed.report.top_n);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let result = HitcountConfig::from_file("/nonexistent/path/hitcount.toml").await;
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            HitcountError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
