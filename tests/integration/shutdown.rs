//! Shutdown coordination tests

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use url_frontier::UrlFrontier;

#[test]
fn test_shutdown_drains_then_releases_consumers() {
    let frontier = Arc::new(UrlFrontier::new(100));
    frontier.add_batch(["https://a.example/", "https://b.example/", "https://c.example/"]);
    frontier.shutdown();

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                let mut drained = Vec::new();
                while let Some(url) = frontier.pop(Duration::from_secs(30)) {
                    drained.push(url);
                }
                drained
            })
        })
        .collect();

    let started = Instant::now();
    let mut drained: Vec<String> = consumers
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert!(started.elapsed() < Duration::from_secs(5));

    drained.sort();
    assert_eq!(drained, vec!["https://a.example/", "https://b.example/", "https://c.example/"]);
}

#[test]
fn test_single_consumer_drains_in_fifo_order_after_shutdown() {
    let frontier = UrlFrontier::new(100);
    let urls: Vec<String> = (0..20).map(|i| format!("https://fifo.example/{}", i)).collect();
    assert_eq!(frontier.add_batch(&urls), 20);

    frontier.shutdown();

    let drained: Vec<String> = std::iter::from_fn(|| frontier.pop(Duration::from_millis(10))).collect();
    assert_eq!(drained, urls);
}

#[test]
fn test_shutdown_releases_blocked_producers() {
    let frontier = Arc::new(UrlFrontier::new(1));
    assert!(frontier.try_add_nowait("https://full.example/"));

    let producers: Vec<_> = (0..3)
        .map(|i| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                let started = Instant::now();
                let added = frontier.try_add(&format!("https://blocked.example/{}", i), Duration::from_secs(30));
                (added, started.elapsed())
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(50));
    frontier.shutdown();

    for producer in producers {
        let (added, elapsed) = producer.join().unwrap();
        assert!(!added);
        assert!(elapsed < Duration::from_secs(5));
    }

    // Claimed but lost
    for i in 0..3 {
        assert!(frontier.is_visited(&format!("https://blocked.example/{}", i)));
    }
    assert_eq!(frontier.stats().urls_added, 1);
}

#[test]
fn test_is_shutdown_disambiguates_empty_pop() {
    let frontier = UrlFrontier::new(4);

    assert!(frontier.pop(Duration::from_millis(10)).is_none());
    assert!(!frontier.is_shutdown(), "Empty pop before shutdown is a timeout");

    frontier.shutdown();
    assert!(frontier.pop(Duration::from_millis(10)).is_none());
    assert!(frontier.is_shutdown());
}
