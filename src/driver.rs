//! Core driver logic for Hestia
//!
//! Composes the feed client and the rate resolver into the periodic
//! refresh pipeline and owns the published snapshot. One refresh is one
//! sequential fetch-then-resolve; refreshes never overlap because
//! `refresh` borrows the driver mutably, and readers observe snapshot
//! replacement atomically through a watch channel.

use crate::calendar::HolidayCalendar;
use crate::config::Config;
use crate::error::Result;
use crate::feed::{FeedClient, FeedSource, FetchError};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::tariff::{RateResolver, RateSnapshot, ResolveError, TariffDocument};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, interval};

/// Refresh-scoped failure taxonomy
///
/// All of these are non-fatal to the process: the previous snapshot (if
/// any) remains authoritative and the scheduler's next tick is the retry.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The feed could not be retrieved
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The retrieved document could not be resolved
    #[error("resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

impl From<RefreshError> for crate::error::HestiaError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Fetch(FetchError::Timeout) => Self::timeout("feed request timed out"),
            RefreshError::Fetch(e) => Self::network(e.to_string()),
            RefreshError::Resolve(e) => Self::feed(e.to_string()),
        }
    }
}

/// Main driver for Hestia
pub struct RateDriver<F: FeedSource = FeedClient> {
    /// Configuration
    config: Config,

    /// Source of the raw tariff document
    feed: F,

    /// Rate resolution engine with last-known-good cache
    resolver: RateResolver,

    /// Logger with context
    logger: StructuredLogger,

    /// Published snapshot; written only by the refresh path
    snapshot_tx: watch::Sender<Option<Arc<RateSnapshot>>>,

    /// Template receiver handed to subscribers
    snapshot_rx: watch::Receiver<Option<Arc<RateSnapshot>>>,

    /// Shutdown signal
    shutdown_tx: mpsc::UnboundedSender<()>,

    /// Shutdown receiver
    shutdown_rx: mpsc::UnboundedReceiver<()>,

    /// Total refresh attempts since startup
    total_refreshes: u64,

    /// Failed refresh attempts since startup
    failed_refreshes: u64,
}

impl RateDriver<FeedClient> {
    /// Create a driver from the default configuration locations
    pub fn new() -> Result<Self> {
        let config = Config::load().map_err(|e| {
            eprintln!("Failed to load configuration: {}", e);
            e
        })?;
        config.validate()?;

        // Initialize logging
        crate::logging::init_logging(&config.logging)?;

        let feed = FeedClient::from_config(&config.feed);
        Ok(Self::with_feed(config, feed))
    }
}

impl<F: FeedSource> RateDriver<F> {
    /// Create a driver with an explicit feed source
    ///
    /// Used directly by tests to exercise refresh semantics without a
    /// network.
    pub fn with_feed(config: Config, feed: F) -> Self {
        let logger = get_logger_with_context(
            LogContext::new("driver").with_company(config.company.name.clone()),
        );
        let resolver = RateResolver::new(config.company.name.clone(), config.profile());

        logger.info("Initializing tariff rate driver");

        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();

        Self {
            config,
            feed,
            resolver,
            logger,
            snapshot_tx,
            snapshot_rx,
            shutdown_tx,
            shutdown_rx,
            total_refreshes: 0,
            failed_refreshes: 0,
        }
    }

    /// Configuration the driver runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Holiday calendar for the configured region
    ///
    /// Handed to time-of-use selection by callers; the driver itself never
    /// performs period selection.
    pub fn holiday_calendar(&self) -> HolidayCalendar {
        HolidayCalendar::for_region(&self.config.region).unwrap_or_else(HolidayCalendar::ontario)
    }

    /// Perform one fetch-then-resolve refresh
    ///
    /// On success the published snapshot is replaced atomically. On
    /// failure the previous snapshot stays in place and the error is
    /// returned for the caller to report; no retry is attempted here.
    pub async fn refresh(&mut self) -> std::result::Result<(), RefreshError> {
        let started = std::time::Instant::now();
        self.total_refreshes = self.total_refreshes.saturating_add(1);

        let body = match self.feed.fetch_feed().await {
            Ok(body) => body,
            Err(e) => {
                self.failed_refreshes = self.failed_refreshes.saturating_add(1);
                self.logger.warn(&format!("Feed fetch failed: {}", e));
                return Err(e.into());
            }
        };

        match self.resolver.resolve(&body) {
            Ok(snapshot) => {
                self.snapshot_tx.send_replace(Some(Arc::clone(&snapshot)));
                self.logger.info(&format!(
                    "Resolved rates for {} in {} ms",
                    snapshot.company,
                    started.elapsed().as_millis()
                ));
                Ok(())
            }
            Err(e) => {
                self.failed_refreshes = self.failed_refreshes.saturating_add(1);
                self.logger.warn(&format!("Rate resolution failed: {}", e));
                Err(e.into())
            }
        }
    }

    /// Most recently published snapshot, if any
    ///
    /// Non-blocking; `None` until the first successful refresh. Zero-valued
    /// tariff fields are never fabricated.
    pub fn current_snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshot replacements
    pub fn subscribe_snapshot(&self) -> watch::Receiver<Option<Arc<RateSnapshot>>> {
        self.snapshot_rx.clone()
    }

    /// Handle that requests the run loop to stop
    pub fn shutdown_handle(&self) -> mpsc::UnboundedSender<()> {
        self.shutdown_tx.clone()
    }

    /// Total and failed refresh attempts since startup
    pub fn refresh_counts(&self) -> (u64, u64) {
        (self.total_refreshes, self.failed_refreshes)
    }

    /// Run the driver main loop
    ///
    /// The first tick fires immediately, so a refresh is attempted at
    /// startup; afterwards one refresh runs per configured interval until
    /// shutdown is requested. Refresh failures are logged and swallowed.
    pub async fn run(&mut self) -> Result<()> {
        self.logger.info("Starting tariff rate driver main loop");

        let mut refresh_interval =
            interval(Duration::from_secs(self.config.feed.refresh_interval_secs));

        loop {
            tokio::select! {
                _ = refresh_interval.tick() => {
                    if let Err(e) = self.refresh().await {
                        self.logger.error(&format!("Refresh failed: {}", e));
                        // Previous snapshot stays authoritative; next tick retries
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    self.logger.info("Shutdown requested");
                    break;
                }
            }
        }

        Ok(())
    }
}

/// List every distribution company available in the feed
///
/// One-shot convenience for host configuration flows; fetches and parses
/// the document without touching any resolver state.
pub async fn list_companies<F: FeedSource>(
    feed: &F,
) -> std::result::Result<Vec<String>, RefreshError> {
    let body = feed.fetch_feed().await?;
    let document = TariffDocument::parse(&body).map_err(ResolveError::from)?;
    Ok(document.company_names())
}
