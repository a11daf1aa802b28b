#![no_main]

use hitcount_log_pipeline::RuleEngine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // 잘못된 규칙은 Err로, 패닉은 없어야 함
    if let Ok(engine) = RuleEngine::parse(data) {
        let _ = engine.is_content("/");
    }
});
