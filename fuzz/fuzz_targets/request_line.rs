#![no_main]

use hitcount_log_pipeline::RequestLine;
use hitcount_log_pipeline::parser::request::decode_url;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = decode_url(data);

    if let Ok(Some(request)) = RequestLine::parse(data) {
        assert!(!request.method.is_empty());
        assert!(!request.protocol.is_empty());
    }
});
