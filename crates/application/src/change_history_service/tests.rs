use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use updatemate_core::{AppError, AppResult, Credentials, UpstreamFieldError, UpstreamRejection};
use updatemate_domain::{AccountId, ChangeEvent, ChangeWindow, DateRange, REPORT_SEPARATOR};

use super::ChangeHistoryService;
use crate::{ChangeEventQuery, ChangeLogSource, Clock};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
struct RecordingSource {
    events: Vec<ChangeEvent>,
    queries: Mutex<Vec<ChangeEventQuery>>,
}

#[async_trait]
impl ChangeLogSource for RecordingSource {
    async fn search_change_events(
        &self,
        _credentials: &Credentials,
        query: &ChangeEventQuery,
    ) -> AppResult<Vec<ChangeEvent>> {
        self.queries
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock source state: {error}")))?
            .push(query.clone());
        Ok(self.events.clone())
    }
}

struct RejectingSource;

#[async_trait]
impl ChangeLogSource for RejectingSource {
    async fn search_change_events(
        &self,
        _credentials: &Credentials,
        _query: &ChangeEventQuery,
    ) -> AppResult<Vec<ChangeEvent>> {
        Err(AppError::Upstream(UpstreamRejection::new(
            Some("req-1".to_owned()),
            vec![UpstreamFieldError::new(
                "The customer account can't be accessed",
                Some("customer_id".to_owned()),
            )],
        )))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap_or_default()
}

fn clock() -> Arc<FixedClock> {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 17, 15, 30, 0)
        .single()
        .unwrap_or_default();
    Arc::new(FixedClock(now))
}

fn credentials() -> Credentials {
    Credentials::new("access", "refresh", "https://token", "client", Vec::new(), None)
        .unwrap_or_else(|error| panic!("{error}"))
}

fn account() -> AccountId {
    AccountId::new("1234567890").unwrap_or_else(|error| panic!("{error}"))
}

fn recorded_queries(source: &RecordingSource) -> Vec<ChangeEventQuery> {
    source
        .queries
        .lock()
        .map(|queries| queries.clone())
        .unwrap_or_default()
}

#[tokio::test]
async fn zero_days_issues_exactly_one_single_day_query() {
    let source = Arc::new(RecordingSource::default());
    let service = ChangeHistoryService::new(source.clone(), clock());

    let events = service.fetch_changes(&credentials(), &account(), 0).await;

    assert!(events.is_ok_and(|events| events.is_empty()));
    let queries = recorded_queries(&source);
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].range, DateRange::new(today(), today()));
    assert_eq!(queries[0].account_id, account());
}

#[tokio::test]
async fn day_count_requests_window_ending_today() {
    for days in [1_i64, 7, 30, 365] {
        let source = Arc::new(RecordingSource::default());
        let service = ChangeHistoryService::new(source.clone(), clock());

        let result = service.fetch_changes(&credentials(), &account(), days).await;
        assert!(result.is_ok());

        let queries = recorded_queries(&source);
        let range = queries[0].range;
        assert_eq!(range.end(), today());
        assert_eq!((range.end() - range.start()).num_days(), days);
    }
}

#[tokio::test]
async fn events_are_returned_in_platform_order() {
    let events = vec![
        ChangeEvent::new("2026-10-17 10:00:00", "a@example.com", "GOOGLE_ADS_WEB_CLIENT", "AD", "r/3"),
        ChangeEvent::new("2026-10-16 10:00:00", "b@example.com", "GOOGLE_ADS_API", "AD_GROUP", "r/2"),
        ChangeEvent::new("2026-10-15 10:00:00", "c@example.com", "GOOGLE_ADS_EDITOR", "CAMPAIGN", "r/1"),
    ];
    let source = Arc::new(RecordingSource {
        events: events.clone(),
        ..RecordingSource::default()
    });
    let service = ChangeHistoryService::new(source, clock());

    let fetched = service.fetch_changes(&credentials(), &account(), 7).await;

    assert_eq!(fetched.ok(), Some(events));
}

#[tokio::test]
async fn summary_contains_one_block_per_event_in_order() {
    let source = Arc::new(RecordingSource {
        events: vec![
            ChangeEvent::new("2026-10-17 10:00:00", "a@example.com", "GOOGLE_ADS_WEB_CLIENT", "AD", "r/3"),
            ChangeEvent::new("2026-10-16 10:00:00", "b@example.com", "GOOGLE_ADS_API", "AD_GROUP", "r/2"),
            ChangeEvent::new("2026-10-15 10:00:00", "c@example.com", "GOOGLE_ADS_EDITOR", "CAMPAIGN", "r/1"),
        ],
        ..RecordingSource::default()
    });
    let service = ChangeHistoryService::new(source, clock());

    let summary = service
        .summarize_changes(&credentials(), &account(), ChangeWindow::TrailingDays(7))
        .await;

    let Ok(summary) = summary else {
        panic!("summary should succeed");
    };
    assert_eq!(summary.event_count, 3);
    assert_eq!(summary.report.matches(REPORT_SEPARATOR).count(), 3);
    let first = summary.report.find("r/3").unwrap_or(usize::MAX);
    let second = summary.report.find("r/2").unwrap_or(usize::MAX);
    let third = summary.report.find("r/1").unwrap_or(usize::MAX);
    assert!(first < second && second < third && third != usize::MAX);
}

#[tokio::test]
async fn explicit_dates_are_queried_as_given() {
    let source = Arc::new(RecordingSource::default());
    let service = ChangeHistoryService::new(source.clone(), clock());
    let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap_or_default();

    let summary = service
        .summarize_changes(&credentials(), &account(), ChangeWindow::Between { start, end })
        .await;

    assert!(summary.is_ok_and(|summary| summary.report.is_empty() && summary.event_count == 0));
    assert_eq!(recorded_queries(&source)[0].range, DateRange::new(start, end));
}

#[tokio::test]
async fn upstream_rejections_propagate_unchanged() {
    let service = ChangeHistoryService::new(Arc::new(RejectingSource), clock());

    let result = service.fetch_changes(&credentials(), &account(), 3).await;

    let Err(AppError::Upstream(rejection)) = result else {
        panic!("expected an upstream rejection");
    };
    assert_eq!(rejection.errors.len(), 1);
    assert_eq!(rejection.errors[0].field_path.as_deref(), Some("customer_id"));
}
