//! Synthetic Crawl Simulation
//!
//! Drives a [`UrlFrontier`] the way a real crawler would: fetch workers pop
//! URLs, "fetch" them against a deterministic synthetic site and feed the
//! discovered links back through [`UrlFrontier::add_batch`]. No network I/O
//! takes place.
//!
//! Termination is decided by a single coordinator watching a shared count of
//! outstanding URLs. A worker adds its outlinks to that count *before* handing
//! them to the frontier and only releases its own page (plus any links the
//! frontier refused) afterwards, so the count never drops below the number of
//! URLs queued or in flight. Once it reaches zero the frontier is shut down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use serde::Serialize;

use crate::frontier::{FrontierStatistics, UrlFrontier};

/// Parameters of a simulated crawl
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of fetch worker threads
    pub workers: usize,
    /// Number of distinct pages on the synthetic site
    pub max_pages: usize,
    /// Outlinks per page
    pub fanout: usize,
    /// Seed URLs; page 0 when empty
    pub seeds: Vec<String>,
    /// URLs registered as visited before seeding, so they are never scheduled
    pub excluded: Vec<String>,
    /// Host name of the synthetic site
    pub host: String,
    /// How long an idle worker waits on the frontier before re-checking
    pub idle_timeout_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            max_pages: 1000,
            fanout: 8,
            seeds: Vec::new(),
            excluded: Vec::new(),
            host: "sim.local".to_string(),
            idle_timeout_ms: 50,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow!("At least one worker is required"));
        }
        if self.max_pages == 0 {
            return Err(anyhow!("max-pages must be greater than 0"));
        }
        if self.idle_timeout_ms == 0 {
            return Err(anyhow!("idle-timeout-ms must be greater than 0"));
        }
        Ok(())
    }

    /// URL of synthetic page `n`
    pub fn page_url(&self, n: usize) -> String {
        format!("https://{}/page/{}", self.host, n)
    }

    /// Outlinks of a fetched URL; URLs outside the synthetic site have none.
    ///
    /// Page numbers beyond the site still resolve, wrapping onto it.
    pub fn outlinks(&self, url: &str) -> Vec<String> {
        match self.page_number(url) {
            Some(n) => (0..self.fanout)
                .map(|i| self.page_url(self.link_target(n, i)))
                .collect(),
            None => Vec::new(),
        }
    }

    // (n * fanout + i + 1) mod max_pages, widened so no input overflows
    fn link_target(&self, n: usize, i: usize) -> usize {
        let target = (n as u128 * self.fanout as u128 + i as u128 + 1) % self.max_pages as u128;
        target as usize
    }

    fn page_number(&self, url: &str) -> Option<usize> {
        let prefix = format!("https://{}/page/", self.host);
        url.strip_prefix(&prefix)?.parse().ok()
    }
}

/// Outcome of a simulated crawl
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub pages_fetched: usize,
    pub distinct_urls: usize,
    pub stats: FrontierStatistics,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Share of the outstanding count held by one worker for its current page.
///
/// Released on drop, so a worker that unwinds mid-page still lets the
/// coordinator reach zero.
struct OutstandingLease<'a> {
    outstanding: &'a AtomicUsize,
    held: usize,
}

impl<'a> OutstandingLease<'a> {
    /// Take over one already-counted URL
    fn new(outstanding: &'a AtomicUsize) -> Self {
        Self { outstanding, held: 1 }
    }

    /// Count newly discovered links before they become visible to other workers
    fn acquire(&mut self, count: usize) {
        self.outstanding.fetch_add(count, Ordering::SeqCst);
        self.held += count;
    }

    /// Hand counted links over to the frontier, which now owns them
    fn transfer(&mut self, count: usize) {
        self.held -= count;
    }
}

impl Drop for OutstandingLease<'_> {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(self.held, Ordering::SeqCst);
    }
}

/// Message from a worker to the coordinator
#[derive(Debug)]
struct PageFetched {
    url: String,
    links_enqueued: usize,
}

/// Run a crawl over the synthetic site until the frontier drains
pub fn run_simulation(frontier: Arc<UrlFrontier>, config: &SimulationConfig) -> Result<SimulationReport> {
    config.validate().context("Invalid simulation configuration")?;
    let started = Instant::now();

    for url in &config.excluded {
        frontier.mark_visited(url);
    }

    let seeds = if config.seeds.is_empty() {
        vec![config.page_url(0)]
    } else {
        config.seeds.clone()
    };
    let seeded = frontier.add_batch(&seeds);
    info!("Seeded frontier with {} of {} URLs", seeded, seeds.len());

    let outstanding = Arc::new(AtomicUsize::new(seeded));
    let (sender, receiver) = unbounded();
    let mut handles = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        let worker_frontier = Arc::clone(&frontier);
        let worker_outstanding = Arc::clone(&outstanding);
        let worker_sender = sender.clone();
        let worker_config = config.clone();
        let spawned = thread::Builder::new()
            .name(format!("worker-{}", id))
            .spawn(move || {
                fetch_worker(&worker_frontier, &worker_config, &worker_outstanding, &worker_sender)
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                // Release any workers already started
                frontier.shutdown();
                return Err(e).with_context(|| format!("Failed to spawn worker {}", id));
            }
        }
    }
    drop(sender);

    let pages_fetched = coordinate(
        &frontier,
        &outstanding,
        &receiver,
        Duration::from_millis(config.idle_timeout_ms),
    );

    for handle in handles {
        if handle.join().is_err() {
            warn!("A fetch worker panicked");
        }
    }

    let report = SimulationReport {
        pages_fetched,
        distinct_urls: frontier.visited_count(),
        stats: frontier.stats(),
        elapsed: started.elapsed(),
    };
    info!(
        "Crawl finished: {} pages fetched, {} distinct URLs in {:?}",
        report.pages_fetched, report.distinct_urls, report.elapsed
    );
    Ok(report)
}

/// Count fetched pages and shut the frontier down once no work remains
fn coordinate(
    frontier: &UrlFrontier,
    outstanding: &AtomicUsize,
    receiver: &Receiver<PageFetched>,
    tick: Duration,
) -> usize {
    let mut fetched = 0;

    while outstanding.load(Ordering::SeqCst) > 0 {
        match receiver.recv_timeout(tick) {
            Ok(page) => {
                fetched += 1;
                debug!("Fetched {} (+{} links)", page.url, page.links_enqueued);
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!(
                    "Waiting on {} outstanding URLs, queue size {}",
                    outstanding.load(Ordering::SeqCst),
                    frontier.queue_size()
                );
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("All workers exited with {} URLs outstanding", outstanding.load(Ordering::SeqCst));
                break;
            }
        }
    }

    frontier.shutdown();
    // Workers report before releasing their page, so every report is already queued
    fetched + receiver.try_iter().count()
}

fn fetch_worker(
    frontier: &UrlFrontier,
    config: &SimulationConfig,
    outstanding: &AtomicUsize,
    sender: &Sender<PageFetched>,
) {
    let idle = Duration::from_millis(config.idle_timeout_ms);

    loop {
        let url = match frontier.pop(idle) {
            Some(url) => url,
            None if frontier.is_shutdown() => break,
            None => continue,
        };

        let mut lease = OutstandingLease::new(outstanding);
        let links = config.outlinks(&url);
        lease.acquire(links.len());
        let links_enqueued = frontier.add_batch(links);
        lease.transfer(links_enqueued);

        let reported = sender.send(PageFetched { url, links_enqueued }).is_ok();
        // Release this page and every link the frontier did not take
        drop(lease);
        if !reported {
            break;
        }
    }

    debug!("Worker exiting");
}
