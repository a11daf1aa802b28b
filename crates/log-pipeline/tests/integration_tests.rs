//! 통합 테스트 -- 파일 수집부터 집계까지 전체 흐름 검증

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use hitcount_log_pipeline::{
    AccessLogParser, CrawlerSignatures, CrawlerStats, LogIngestor, LogPipelineError, RecordError,
    RuleEngine, Summary, UrlDetails,
};

const SIGNATURES: &str = "Googlebot\nbot\nspider\n";

const RULES: &str = "\
// static assets
^/static/
$.css
$.js
// feeds and probes
=/feed
~wp-login
";

fn line(ip: &str, request: &str, status: &str, agent: &str) -> String {
    format!(
        "10/Oct/2023:13:55:36 +0000 | {ip} | {request} | {status} | 512 | - | {agent} | 0.004"
    )
}

fn write_log(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).expect("failed to write log fixture");
    path
}

fn ingestor(workers: usize) -> LogIngestor {
    let parser = AccessLogParser::new(CrawlerSignatures::parse(SIGNATURES));
    LogIngestor::new(Arc::new(parser), workers)
}

/// 여러 파일을 병렬로 수집하면 모든 레코드가 순서와 무관하게 모임
#[tokio::test]
async fn test_parallel_ingest_merges_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = Vec::new();
    for i in 0..6 {
        let lines: Vec<String> = (0..10)
            .map(|n| {
                line(
                    &format!("10.0.{i}.{n}"),
                    &format!("GET /posts/{i}/{n} HTTP/1.1"),
                    "200",
                    "Mozilla/5.0",
                )
            })
            .collect();
        files.push(write_log(dir.path(), &format!("access.log.{i}"), &lines));
    }

    let records = ingestor(3).ingest(&files).await.unwrap();
    assert_eq!(records.len(), 60);

    let mut urls: Vec<&str> = records.iter().filter_map(|r| r.request_url()).collect();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), 60);
}

/// 워커 수와 무관하게 같은 결과
#[tokio::test]
async fn test_worker_count_does_not_change_result() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = (0..4)
        .map(|i| {
            write_log(
                dir.path(),
                &format!("access.log.{i}"),
                &[
                    line("10.0.0.1", "GET /a HTTP/1.1", "200", "Mozilla/5.0"),
                    line("10.0.0.2", "GET /b HTTP/1.1", "404", "Googlebot/2.1"),
                ],
            )
        })
        .collect();

    let mut single = ingestor(1).ingest(&files).await.unwrap();
    let mut many = ingestor(8).ingest(&files).await.unwrap();

    let key = |r: &hitcount_core::types::LogRecord| {
        (r.remote_address().to_owned(), r.request_url().map(str::to_owned))
    };
    single.sort_by_key(key);
    many.sort_by_key(key);
    assert_eq!(single, many);
}

/// 잘못된 라인 하나가 수집 전체를 실패시키고 위치를 알려줌
#[tokio::test]
async fn test_malformed_line_aborts_with_location() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_log(
        dir.path(),
        "access.log",
        &[line("10.0.0.1", "GET / HTTP/1.1", "200", "Mozilla/5.0")],
    );
    let bad = write_log(
        dir.path(),
        "access.log.1",
        &[
            line("10.0.0.1", "GET / HTTP/1.1", "200", "Mozilla/5.0"),
            line("10.0.0.1", "GET / HTTP/1.1", "200", "Mozilla/5.0"),
            line("10.0.0.2", "GET / HTTP/1.1", "OK", "Mozilla/5.0"),
        ],
    );

    let err = ingestor(2).ingest(&[good, bad.clone()]).await.unwrap_err();
    match err {
        LogPipelineError::Record { path, line, source } => {
            assert_eq!(path, bad.display().to_string());
            assert_eq!(line, 3);
            assert_eq!(
                source,
                RecordError::MalformedInteger {
                    raw: "OK".to_owned()
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// 7개 필드 라인은 MalformedLine
#[tokio::test]
async fn test_seven_field_line_is_malformed_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.log");
    std::fs::write(
        &path,
        "10/Oct/2023:13:55:36 +0000 | 10.0.0.1 | GET / HTTP/1.1 | 200 | 512 | - | Mozilla/5.0\n",
    )
    .unwrap();

    let err = ingestor(1).ingest(&[path]).await.unwrap_err();
    assert!(matches!(
        err,
        LogPipelineError::Record {
            line: 1,
            source: RecordError::MalformedLine { fields: 7, .. },
            ..
        }
    ));
}

/// broken request, 빈 요청, 공백이 섞인 URL이 한 파일에 공존
#[tokio::test]
async fn test_request_line_variants() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(
        dir.path(),
        "access.log",
        &[
            line("10.0.0.1", "\\x16\\x03\\x01", "000", "-"),
            line("10.0.0.2", "", "400", "-"),
            line("10.0.0.3", "GET /a b/path HTTP/1.1", "200", "Mozilla/5.0"),
        ],
    );

    let records = ingestor(1).ingest(&[path]).await.unwrap();
    let by_ip = |ip: &str| {
        records
            .iter()
            .find(|r| r.remote_address() == ip)
            .expect("record should exist")
    };

    let broken = by_ip("10.0.0.1");
    assert_eq!(broken.response_code(), 500);
    assert_eq!(broken.request_url(), Some("-"));

    let blank = by_ip("10.0.0.2");
    assert_eq!(blank.response_code(), 400);
    assert_eq!(blank.request_url(), None);

    let spaced = by_ip("10.0.0.3");
    assert_eq!(spaced.request_url(), Some("/a b/path"));
}

/// 수집 결과로 요약/상세/크롤러 통계를 만든다
#[tokio::test]
async fn test_ingest_then_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(
        dir.path(),
        "access.log",
        &[
            line("10.0.0.1", "GET /posts/rust/ HTTP/1.1", "200", "Firefox"),
            line("10.0.0.2", "GET /posts/rust?ref=rss HTTP/1.1", "200", "Chrome"),
            line("10.0.0.3", "GET /static/site.css HTTP/1.1", "200", "Firefox"),
            line("10.0.0.4", "GET /feed HTTP/1.1", "200", "Feedly"),
            line("10.0.0.5", "GET /missing HTTP/1.1", "404", "Firefox"),
            line("66.249.66.1", "GET /posts/rust HTTP/1.1", "200", "Mozilla/5.0 (compatible; Googlebot/2.1)"),
            line("10.0.0.6", "GET /posts/rust HTTP/1.1", "200", "SomeSpider/1.0"),
            line("10.0.0.7", "GET /posts/go HTTP/1.1", "200", ""),
        ],
    );

    let records = ingestor(2).ingest(&[path]).await.unwrap();
    let engine = RuleEngine::parse(RULES).unwrap();
    let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();

    let summary = Summary::build(&records, &engine, date, 15);
    assert_eq!(summary.total_records, 8);
    assert_eq!(summary.crawler_records, 3);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.content_hits, 2);
    assert_eq!(summary.previous_day_hits, 0);
    assert_eq!(summary.top_urls.len(), 1);
    assert_eq!(summary.top_urls[0].key, "/posts/rust");
    assert_eq!(summary.top_urls[0].count, 2);

    let details = UrlDetails::build(&records, "/posts/rust", None);
    assert_eq!(details.users, 2);
    assert_eq!(details.crawlers, 2);

    let stats = CrawlerStats::build(&records);
    let tokens: Vec<&str> = stats.groups.iter().map(|g| g.token.as_str()).collect();
    assert_eq!(tokens, vec!["(empty user agent)", "Googlebot", "spider"]);
}

/// 디스크의 규칙/시그니처 파일로 구성
#[tokio::test]
async fn test_load_rules_and_signatures_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = dir.path().join("content-exclude.txt");
    let signatures_path = dir.path().join("crawler-user-agents.txt");
    std::fs::write(&rules_path, RULES).unwrap();
    std::fs::write(&signatures_path, SIGNATURES).unwrap();

    let engine = RuleEngine::load(&rules_path).await.unwrap();
    assert_eq!(engine.rule_count(), 5);
    assert!(!engine.is_content("/static/app.js"));
    assert!(engine.is_content("/posts/rust"));

    let signatures = CrawlerSignatures::load(&signatures_path).await.unwrap();
    assert_eq!(signatures.len(), 3);
}

/// 잘못된 규칙 파일은 줄 번호와 함께 실패
#[tokio::test]
async fn test_malformed_rule_file() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = dir.path().join("content-exclude.txt");
    std::fs::write(&rules_path, "^/static/\n\n// comment\n!nope\n").unwrap();

    let err = RuleEngine::load(&rules_path).await.unwrap_err();
    assert!(matches!(err, LogPipelineError::MalformedRule { line: 4, .. }));
}
