//! Concurrent producer/consumer behaviour

use crate::frontier::UrlFrontier;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_racing_producers_enqueue_url_once() {
    let threads = 8;
    let frontier = Arc::new(UrlFrontier::new(100));
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                frontier.try_add("https://example.com/contended", Duration::from_millis(100))
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|added| *added)
        .count();

    assert_eq!(successes, 1);
    let stats = frontier.stats();
    assert_eq!(stats.urls_added, 1);
    assert_eq!(stats.duplicates_skipped, threads - 1);
    assert_eq!(frontier.queue_size(), 1);
}

#[test]
fn test_no_duplicate_delivery_across_consumers() {
    let frontier = Arc::new(UrlFrontier::new(64));
    let producers: Vec<_> = (0..4)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                // Every producer discovers the same overlapping link set
                for i in 0..500 {
                    frontier.try_add(&format!("https://example.com/{}", i % 250), Duration::from_secs(2));
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                let mut seen = Vec::new();
                while let Some(url) = frontier.pop(Duration::from_millis(300)) {
                    seen.push(url);
                }
                seen
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }

    let mut delivered = Vec::new();
    for consumer in consumers {
        delivered.extend(consumer.join().unwrap());
    }

    let unique: HashSet<_> = delivered.iter().cloned().collect();
    assert_eq!(unique.len(), delivered.len(), "A URL was delivered twice");
    assert_eq!(delivered.len(), 250);

    let stats = frontier.stats();
    assert_eq!(stats.urls_added, 250);
    assert_eq!(stats.duplicates_skipped, 4 * 500 - 250);
}

#[test]
fn test_shutdown_unblocks_waiting_consumers() {
    let frontier = Arc::new(UrlFrontier::new(8));
    let consumers: Vec<_> = (0..5)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                let start = Instant::now();
                let url = frontier.pop(Duration::from_secs(30));
                (url, start.elapsed())
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(50));
    frontier.shutdown();

    for consumer in consumers {
        let (url, elapsed) = consumer.join().unwrap();
        assert!(url.is_none());
        assert!(elapsed < Duration::from_secs(5));
    }
    assert!(frontier.is_shutdown());
}

#[test]
fn test_readers_run_alongside_writers() {
    let frontier = Arc::new(UrlFrontier::new(1000));
    for i in 0..100 {
        frontier.mark_visited(&format!("https://example.com/{}", i));
    }

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                (0..100)
                    .filter(|i| frontier.is_visited(&format!("https://example.com/{}", i)))
                    .count()
            })
        })
        .collect();

    let writer = {
        let frontier = Arc::clone(&frontier);
        thread::spawn(move || {
            for i in 100..200 {
                frontier.mark_visited(&format!("https://example.com/{}", i));
            }
        })
    };

    for reader in readers {
        // Membership only grows, so earlier marks are always observed
        assert_eq!(reader.join().unwrap(), 100);
    }
    writer.join().unwrap();
    assert_eq!(frontier.visited_count(), 200);
}

proptest! {
    /// Repeating a URL N times yields one success and N-1 duplicates
    #[test]
    fn prop_repeated_url_added_once(repeats in 1usize..20, path in "[a-z]{1,12}") {
        let frontier = UrlFrontier::new(4);
        let url = format!("https://example.com/{}", path);

        let successes = (0..repeats).filter(|_| frontier.try_add_nowait(&url)).count();

        prop_assert_eq!(successes, 1);
        prop_assert_eq!(frontier.stats().duplicates_skipped, repeats - 1);
        prop_assert_eq!(frontier.visited_count(), 1);
    }
}
