//! 대소문자 무시 비교용 문자열 폴딩

use std::borrow::Cow;

/// 소문자로 폴딩합니다. 이미 소문자 ASCII이면 할당하지 않습니다.
pub(crate) fn fold_case(value: &str) -> Cow<'_, str> {
    if value.is_ascii() && !value.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.to_lowercase())
    }
}
