#![no_main]

use hitcount_log_pipeline::{AccessLogParser, CrawlerSignatures};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let parser = AccessLogParser::new(CrawlerSignatures::parse("bot\nspider\nGooglebot"));
    let line = String::from_utf8_lossy(data);

    // 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    if let Ok(record) = parser.parse_line(&line) {
        // 정규화 URL은 항상 원본 URL의 접두어
        if let (Some(url), Some(normalized)) = (record.request_url(), record.normalized_url()) {
            assert!(url.starts_with(normalized));
        }
    }
});
