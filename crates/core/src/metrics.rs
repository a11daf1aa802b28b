//! 메트릭 상수
//!
//! 메트릭 이름을 한 곳에서 정의합니다. 각 모듈은 이 상수로
//! `metrics::counter!()` 매크로를 호출합니다. 레코더가 설치되지 않으면 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `hitcount_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(hitcount_core::metrics::INGEST_LINES_PARSED_TOTAL).increment(1);
//! ```

/// 처리 완료된 로그 파일 수 (counter)
pub const INGEST_FILES_TOTAL: &str = "hitcount_ingest_files_total";

/// 파싱된 로그 라인 수 (counter)
pub const INGEST_LINES_PARSED_TOTAL: &str = "hitcount_ingest_lines_parsed_total";

/// 크롤러로 분류된 레코드 수 (counter)
pub const INGEST_CRAWLER_RECORDS_TOTAL: &str = "hitcount_ingest_crawler_records_total";

/// 파싱 실패 수 (counter). 실패는 수집 전체를 중단시키므로 보통 0 또는 1입니다.
pub const INGEST_PARSE_ERRORS_TOTAL: &str = "hitcount_ingest_parse_errors_total";

/// 로드된 콘텐츠 제외 규칙 수 (gauge)
pub const RULES_LOADED: &str = "hitcount_rules_loaded";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn metric_names_are_unique_and_prefixed() {
        let names = [
            INGEST_FILES_TOTAL,
            INGEST_LINES_PARSED_TOTAL,
            INGEST_CRAWLER_RECORDS_TOTAL,
            INGEST_PARSE_ERRORS_TOTAL,
            RULES_LOADED,
        ];
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert!(names.iter().all(|name| name.starts_with("hitcount_")));
    }
}
