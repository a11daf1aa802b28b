//! 집계용 URL 정규화
//!
//! 정규화 결과는 그룹화 키로만 사용합니다. 재인코딩이나 URL 유효성 검증은 하지 않습니다.

/// 요청 URL을 그룹화 키로 정규화합니다.
///
/// 1. 공백뿐인 문자열은 그대로 반환
/// 2. 첫 `?` 이후 제거 (쿼리스트링)
/// 3. 첫 `#` 이후 제거 (프래그먼트)
/// 4. 남은 길이가 1보다 크면 끝의 `/`를 모두 제거 (`/`는 루트로 유지)
pub fn normalize_url(url: &str) -> &str {
    if url.trim().is_empty() {
        return url;
    }

    let mut normalized = match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    };

    if let Some(idx) = normalized.find('#') {
        normalized = &normalized[..idx];
    }

    if normalized.len() > 1 {
        normalized = normalized.trim_end_matches('/');
    }

    normalized
}
