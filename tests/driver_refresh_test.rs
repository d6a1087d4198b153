mod common;

use common::FULL_FEED;
use hestia::config::Config;
use hestia::driver::{RateDriver, RefreshError, list_companies};
use hestia::feed::{FeedSource, FetchError};
use hestia::tariff::ResolvedRates;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Feed source that always returns the same body
struct StaticFeed(&'static str);

#[async_trait::async_trait]
impl FeedSource for StaticFeed {
    async fn fetch_feed(&self) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
}

/// Feed source that always times out
struct TimeoutFeed;

#[async_trait::async_trait]
impl FeedSource for TimeoutFeed {
    async fn fetch_feed(&self) -> Result<String, FetchError> {
        Err(FetchError::Timeout)
    }
}

/// Feed source that replays a scripted sequence of responses
struct SequenceFeed {
    responses: Mutex<VecDeque<Result<String, FetchError>>>,
}

impl SequenceFeed {
    fn new(responses: Vec<Result<String, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }
}

#[async_trait::async_trait]
impl FeedSource for SequenceFeed {
    async fn fetch_feed(&self) -> Result<String, FetchError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Network("sequence exhausted".to_string())))
    }
}

fn gas_config(company: &str) -> Config {
    let mut config = Config::default();
    config.company.name = company.to_string();
    config
}

#[tokio::test]
async fn successful_refresh_publishes_snapshot() {
    let mut driver = RateDriver::with_feed(gas_config("ACME Gas"), StaticFeed(FULL_FEED));
    assert!(driver.current_snapshot().is_none());

    driver.refresh().await.unwrap();

    let snapshot = driver.current_snapshot().unwrap();
    assert_eq!(snapshot.company, "ACME Gas");
    let ResolvedRates::NaturalGas(ref gas) = snapshot.rates else {
        panic!("expected natural gas rates");
    };
    assert_eq!(gas.monthly_charge, 24.50);
    assert_eq!(driver.refresh_counts(), (1, 0));
}

#[tokio::test]
async fn first_ever_failure_leaves_no_snapshot() {
    let mut driver = RateDriver::with_feed(gas_config("ACME Gas"), TimeoutFeed);

    let err = driver.refresh().await.unwrap_err();
    assert!(matches!(err, RefreshError::Fetch(FetchError::Timeout)));

    // Explicitly not available, never a zeroed snapshot
    assert!(driver.current_snapshot().is_none());
    assert_eq!(driver.refresh_counts(), (1, 1));
}

#[tokio::test]
async fn fetch_timeout_keeps_previous_snapshot() {
    let feed = SequenceFeed::new(vec![Ok(FULL_FEED.to_string()), Err(FetchError::Timeout)]);
    let mut driver = RateDriver::with_feed(gas_config("ACME Gas"), feed);

    driver.refresh().await.unwrap();
    let before = driver.current_snapshot().unwrap();

    let err = driver.refresh().await.unwrap_err();
    assert!(matches!(err, RefreshError::Fetch(FetchError::Timeout)));

    let after = driver.current_snapshot().unwrap();
    assert!(std::sync::Arc::ptr_eq(&before, &after));
    assert_eq!(driver.refresh_counts(), (2, 1));
}

#[tokio::test]
async fn resolution_failure_keeps_previous_snapshot() {
    let without_acme = FULL_FEED.replace("ACME Gas", "Renamed Gas Co.");
    let feed = SequenceFeed::new(vec![Ok(FULL_FEED.to_string()), Ok(without_acme)]);
    let mut driver = RateDriver::with_feed(gas_config("ACME Gas"), feed);

    driver.refresh().await.unwrap();
    let before = driver.current_snapshot().unwrap();

    let err = driver.refresh().await.unwrap_err();
    assert!(matches!(err, RefreshError::Resolve(_)));

    let after = driver.current_snapshot().unwrap();
    assert!(std::sync::Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn malformed_feed_is_a_resolve_error() {
    let feed = SequenceFeed::new(vec![Ok("<Root><GasBillData>".to_string())]);
    let mut driver = RateDriver::with_feed(gas_config("ACME Gas"), feed);
    let err = driver.refresh().await.unwrap_err();
    assert!(matches!(err, RefreshError::Resolve(_)));
    assert!(driver.current_snapshot().is_none());
}

#[tokio::test]
async fn subscribers_observe_replacement() {
    let mut driver = RateDriver::with_feed(gas_config("ACME Gas"), StaticFeed(FULL_FEED));
    let mut rx = driver.subscribe_snapshot();
    assert!(rx.borrow().is_none());

    driver.refresh().await.unwrap();

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone().unwrap();
    assert_eq!(seen.company, "ACME Gas");
}

#[tokio::test]
async fn list_companies_enumerates_sorted_names() {
    let feed = StaticFeed(FULL_FEED);
    let companies = list_companies(&feed).await.unwrap();
    assert_eq!(
        companies,
        vec!["ACME Gas".to_string(), "Lakeview Energy".to_string()]
    );
}

#[tokio::test]
async fn list_companies_surfaces_fetch_errors() {
    let err = list_companies(&TimeoutFeed).await.unwrap_err();
    assert!(matches!(err, RefreshError::Fetch(FetchError::Timeout)));
}
