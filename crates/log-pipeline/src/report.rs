//! 수집된 레코드 집계
//!
//! - [`Summary`]: 전체/크롤러/404/콘텐츠 건수, 특정 날짜의 상위 URL과 전날 같은 시각까지의 조회 수
//! - [`UrlDetails`]: URL 하나에 대한 상태 코드, 리퍼러, IP, User-Agent 분포
//! - [`CrawlerStats`]: 크롤러 매치 토큰별 건수와 해당 User-Agent
//!
//! 모든 그룹 목록은 건수 내림차순, 같으면 키 오름차순으로 정렬합니다.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hitcount_core::types::LogRecord;
use serde::Serialize;

use crate::rule::{ContentRule, RuleEngine};

/// 이동(301) 응답은 콘텐츠 조회로 세지 않음
const MOVED_PERMANENTLY: u16 = 301;
const NOT_FOUND: u16 = 404;
const CLIENT_ERROR_START: u16 = 400;

/// 그룹 키와 건수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// 상태 코드와 건수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: u16,
    pub count: usize,
}

/// 사람이 실제로 본 콘텐츠 페이지 조회인지 판단합니다.
///
/// 크롤러가 아니고, 정규화 URL이 콘텐츠 규칙을 통과하고, 상태 코드가 400 미만이면서 301이 아니어야 합니다.
/// 요청 URL이 없는 레코드는 콘텐츠가 아닙니다.
pub fn is_content_hit<R: ContentRule>(record: &LogRecord, engine: &RuleEngine<R>) -> bool {
    if record.is_ignored() {
        return false;
    }

    let status = record.response_code();
    if status >= CLIENT_ERROR_START || status == MOVED_PERMANENTLY {
        return false;
    }

    record
        .normalized_url()
        .is_some_and(|url| engine.is_content(url))
}

/// 전체 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub crawler_records: usize,
    pub not_found: usize,
    pub content_hits: usize,
    /// 상위 URL 집계 기준 날짜 (UTC)
    pub date: NaiveDate,
    /// `date`의 콘텐츠 조회 수
    pub date_content_hits: usize,
    /// `date` 전날의 콘텐츠 조회 수 (기준 시각까지)
    pub previous_day_hits: usize,
    pub top_urls: Vec<GroupCount>,
}

impl Summary {
    /// `date`가 끝난 하루라고 보고 집계합니다. 전날은 하루 전체를 셉니다.
    pub fn build<R: ContentRule>(
        records: &[LogRecord],
        engine: &RuleEngine<R>,
        date: NaiveDate,
        top_n: usize,
    ) -> Self {
        Self::build_until(records, engine, date, None, top_n)
    }

    /// `as_of` 시각 기준으로 집계합니다.
    ///
    /// 날짜는 `as_of`의 날짜이고, 전날은 `as_of`와 같은 시각(포함)까지만 셉니다.
    pub fn build_as_of<R: ContentRule>(
        records: &[LogRecord],
        engine: &RuleEngine<R>,
        as_of: DateTime<Utc>,
        top_n: usize,
    ) -> Self {
        Self::build_until(records, engine, as_of.date_naive(), Some(as_of.time()), top_n)
    }

    fn build_until<R: ContentRule>(
        records: &[LogRecord],
        engine: &RuleEngine<R>,
        date: NaiveDate,
        cutoff: Option<NaiveTime>,
        top_n: usize,
    ) -> Self {
        let content: Vec<&LogRecord> = records
            .iter()
            .filter(|record| is_content_hit(record, engine))
            .collect();

        let on_date: Vec<&LogRecord> = content
            .iter()
            .copied()
            .filter(|record| record.time().date_naive() == date)
            .collect();

        let previous_day_hits = date.pred_opt().map_or(0, |previous| {
            content
                .iter()
                .filter(|record| {
                    let time = record.time();
                    time.date_naive() == previous
                        && cutoff.is_none_or(|limit| time.time() <= limit)
                })
                .count()
        });

        let mut top_urls = group_counts(on_date.iter().filter_map(|record| record.normalized_url()));
        top_urls.truncate(top_n);

        Self {
            total_records: records.len(),
            crawler_records: records.iter().filter(|r| r.is_ignored()).count(),
            not_found: records
                .iter()
                .filter(|r| r.response_code() == NOT_FOUND)
                .count(),
            content_hits: content.len(),
            date,
            date_content_hits: on_date.len(),
            previous_day_hits,
            top_urls,
        }
    }
}

/// URL 하나에 대한 상세 통계
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlDetails {
    pub url: String,
    pub date: Option<NaiveDate>,
    pub total: usize,
    pub crawlers: usize,
    pub users: usize,
    /// 사람 요청의 상태 코드 분포
    pub status_codes: Vec<StatusCount>,
    pub referrers: Vec<GroupCount>,
    pub remote_addresses: Vec<GroupCount>,
    pub user_agents: Vec<GroupCount>,
    pub crawler_user_agents: Vec<GroupCount>,
}

impl UrlDetails {
    /// 정규화 URL이 `url`과 같은(대소문자 무시) 레코드를 집계합니다.
    ///
    /// `date`가 있으면 그 날짜(UTC)의 레코드만 봅니다.
    pub fn build(records: &[LogRecord], url: &str, date: Option<NaiveDate>) -> Self {
        let target = url.to_lowercase();
        let (crawlers, users): (Vec<&LogRecord>, Vec<&LogRecord>) = records
            .iter()
            .filter(|record| date.is_none_or(|day| record.time().date_naive() == day))
            .filter(|record| {
                record
                    .normalized_url()
                    .is_some_and(|normalized| normalized.to_lowercase() == target)
            })
            .partition(|record| record.is_ignored());

        let mut status_counts: HashMap<u16, usize> = HashMap::new();
        for record in &users {
            *status_counts.entry(record.response_code()).or_default() += 1;
        }
        let mut status_codes: Vec<StatusCount> = status_counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect();
        status_codes.sort_by(|a, b| b.count.cmp(&a.count).then(a.status.cmp(&b.status)));

        Self {
            url: url.to_owned(),
            date,
            total: crawlers.len() + users.len(),
            crawlers: crawlers.len(),
            users: users.len(),
            status_codes,
            referrers: group_counts(users.iter().map(|r| r.referrer())),
            remote_addresses: group_counts(users.iter().map(|r| r.remote_address())),
            user_agents: group_counts(users.iter().map(|r| r.user_agent())),
            crawler_user_agents: group_counts(crawlers.iter().map(|r| r.user_agent())),
        }
    }
}

/// 크롤러 매치 토큰 하나의 통계
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerGroup {
    /// 매치된 시그니처, `-`, 또는 빈 User-Agent 표시
    pub token: String,
    pub total: usize,
    pub user_agents: Vec<GroupCount>,
}

/// 크롤러로 분류된 레코드 통계
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerStats {
    pub total: usize,
    pub groups: Vec<CrawlerGroup>,
}

impl CrawlerStats {
    pub fn build(records: &[LogRecord]) -> Self {
        let mut by_token: HashMap<String, Vec<&str>> = HashMap::new();
        let mut total = 0;

        for record in records {
            let Some(crawler) = record.crawler() else {
                continue;
            };
            total += 1;
            by_token
                .entry(crawler.to_string())
                .or_default()
                .push(record.user_agent());
        }

        let mut groups: Vec<CrawlerGroup> = by_token
            .into_iter()
            .map(|(token, user_agents)| CrawlerGroup {
                token,
                total: user_agents.len(),
                user_agents: group_counts(user_agents),
            })
            .collect();
        groups.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.token.cmp(&b.token)));

        Self { total, groups }
    }
}

/// 값별 건수를 세어 건수 내림차순, 키 오름차순으로 정렬합니다.
fn group_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<GroupCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_owned(),
            count,
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    groups
}
