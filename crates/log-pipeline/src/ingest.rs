//! 로그 파일 병렬 수집
//!
//! 파일 목록을 워커 수만큼 라운드로빈으로 나누고, 워커마다 tokio 태스크 하나가
//! 자기 몫의 파일을 끝까지 처리합니다. 파일 읽기는 비동기로, 라인 파싱은
//! `spawn_blocking` 풀에서 수행합니다.
//!
//! 잘못된 라인이 하나라도 나오면 수집 전체가 실패합니다.
//! 첫 실패 시 [`CancellationToken`]을 취소해 다른 워커는 다음 파일로 넘어가기 전에 멈춥니다.
//! 워커별 결과는 모든 태스크가 끝난 뒤 병합하며, 결과 순서는 보장하지 않습니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hitcount_core::metrics as names;
use hitcount_core::types::LogRecord;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{IngestConfig, resolve_workers};
use crate::error::LogPipelineError;
use crate::parser::AccessLogParser;

/// 액세스 로그 수집기
///
/// 파서(크롤러 시그니처 포함)는 수집 시작 전에 완성되어 있어야 하며,
/// 수집 중에는 읽기 전용으로 모든 워커가 공유합니다.
pub struct LogIngestor {
    parser: Arc<AccessLogParser>,
    workers: usize,
}

impl LogIngestor {
    /// 새 수집기를 생성합니다. `workers`가 0이면 CPU 수만큼 워커를 사용합니다.
    pub fn new(parser: Arc<AccessLogParser>, workers: usize) -> Self {
        Self {
            parser,
            workers: resolve_workers(workers),
        }
    }

    /// 수집 설정으로부터 수집기를 생성합니다.
    pub fn from_config(config: &IngestConfig, parser: Arc<AccessLogParser>) -> Self {
        Self::new(parser, config.workers)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn parser(&self) -> &AccessLogParser {
        &self.parser
    }

    /// 파일 목록 전체를 수집합니다.
    ///
    /// # Errors
    /// 첫 번째로 관측된 실패(파일 읽기, 라인 파싱, 워커 panic)를 반환하며 부분 결과는 버립니다.
    pub async fn ingest(&self, files: &[PathBuf]) -> Result<Vec<LogRecord>, LogPipelineError> {
        if files.is_empty() {
            warn!("no log files to ingest");
            return Ok(Vec::new());
        }

        let worker_count = self.workers.min(files.len());
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for (worker_id, partition) in partition(files, worker_count).into_iter().enumerate() {
            let parser = Arc::clone(&self.parser);
            let cancel = cancel.clone();
            tasks.spawn(run_worker(worker_id, partition, parser, cancel));
        }

        debug!(workers = worker_count, files = files.len(), "ingest workers started");

        let mut records = Vec::new();
        let mut first_error = None;

        while let Some(joined) = tasks.join_next().await {
            let result = joined
                .unwrap_or_else(|e| Err(LogPipelineError::Worker(format!("worker task failed: {e}"))));

            match result {
                Ok(mut local) => records.append(&mut local),
                Err(err) => {
                    cancel.cancel();
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        let crawlers = records.iter().filter(|r| r.is_ignored()).count();
        info!(
            files = files.len(),
            records = records.len(),
            crawlers,
            "ingestion complete"
        );

        Ok(records)
    }

    /// 파일 하나를 수집합니다.
    pub async fn ingest_file(&self, path: &Path) -> Result<Vec<LogRecord>, LogPipelineError> {
        read_and_parse(Arc::clone(&self.parser), path).await
    }
}

/// 파일을 라운드로빈으로 `workers`개 묶음으로 나눕니다.
fn partition(files: &[PathBuf], workers: usize) -> Vec<Vec<PathBuf>> {
    let workers = workers.max(1);
    let mut partitions = vec![Vec::new(); workers];
    for (index, file) in files.iter().enumerate() {
        partitions[index % workers].push(file.clone());
    }
    partitions
}

async fn run_worker(
    worker_id: usize,
    files: Vec<PathBuf>,
    parser: Arc<AccessLogParser>,
    cancel: CancellationToken,
) -> Result<Vec<LogRecord>, LogPipelineError> {
    let mut records = Vec::new();

    for path in files {
        if cancel.is_cancelled() {
            debug!(worker_id, "ingest worker cancelled");
            break;
        }

        match read_and_parse(Arc::clone(&parser), &path).await {
            Ok(mut local) => records.append(&mut local),
            Err(err) => {
                cancel.cancel();
                return Err(err);
            }
        }
    }

    Ok(records)
}

/// 일부 편집기가 파일 맨 앞에 붙이는 바이트 순서 표시
const UTF8_BOM: char = '\u{feff}';

async fn read_and_parse(
    parser: Arc<AccessLogParser>,
    path: &Path,
) -> Result<Vec<LogRecord>, LogPipelineError> {
    info!(path = %path.display(), "processing log file");

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| LogPipelineError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    // 잘못된 UTF-8 바이트는 대체 문자로 바꿔 라인 파서가 판단하게 둠
    let mut content = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
    if content.starts_with(UTF8_BOM) {
        content.drain(..UTF8_BOM.len_utf8());
    }

    let source = path.display().to_string();
    let records = tokio::task::spawn_blocking(move || parse_lines(&parser, &source, &content))
        .await
        .map_err(|e| LogPipelineError::Worker(format!("spawn_blocking failed: {e}")))??;

    metrics::counter!(names::INGEST_FILES_TOTAL).increment(1);
    Ok(records)
}

/// 텍스트의 모든 라인을 파싱합니다.
///
/// 마지막 줄바꿈 뒤에는 라인이 없는 것으로 보지만, 그 외의 빈 줄은 잘못된 라인입니다.
/// 첫 실패에서 `source`와 1부터 시작하는 라인 번호를 담아 중단합니다.
pub fn parse_lines(
    parser: &AccessLogParser,
    source: &str,
    content: &str,
) -> Result<Vec<LogRecord>, LogPipelineError> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let record = parser.parse_line(line).map_err(|err| {
            metrics::counter!(names::INGEST_PARSE_ERRORS_TOTAL).increment(1);
            LogPipelineError::Record {
                path: source.to_owned(),
                line: index + 1,
                source: err,
            }
        })?;
        records.push(record);
    }

    let crawlers = records.iter().filter(|r| r.is_ignored()).count();
    metrics::counter!(names::INGEST_LINES_PARSED_TOTAL).increment(records.len() as u64);
    metrics::counter!(names::INGEST_CRAWLER_RECORDS_TOTAL).increment(crawlers as u64);
    debug!(source, records = records.len(), crawlers, "parsed log content");

    Ok(records)
}
