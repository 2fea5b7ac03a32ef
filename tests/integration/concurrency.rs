//! Concurrency & Load Tests
//!
//! Many producers and consumers hammering one shared frontier.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use url_frontier::UrlFrontier;

fn url(i: usize) -> String {
    format!("https://load.example/item/{}", i)
}

#[test]
fn test_overlapping_producers_deliver_each_url_once() {
    let producers = 6;
    let consumers = 4;
    let distinct = 2000;
    let frontier = Arc::new(UrlFrontier::new(128));
    let start = Arc::new(Barrier::new(producers));

    let producer_handles: Vec<_> = (0..producers)
        .map(|p| {
            let frontier = Arc::clone(&frontier);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                let mut added = 0;
                // Each producer walks the whole range from a different offset
                for i in 0..distinct {
                    if frontier.try_add(&url((i + p * 97) % distinct), Duration::from_secs(5)) {
                        added += 1;
                    }
                }
                added
            })
        })
        .collect();

    let consumer_handles: Vec<_> = (0..consumers)
        .map(|_| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                let mut received = Vec::new();
                loop {
                    match frontier.pop(Duration::from_millis(50)) {
                        Some(url) => received.push(url),
                        None if frontier.is_shutdown() => break,
                        None => continue,
                    }
                }
                received
            })
        })
        .collect();

    let added: usize = producer_handles.into_iter().map(|h| h.join().unwrap()).sum();

    // Producers are done; let consumers drain and then release them
    while !frontier.queue_empty() {
        thread::sleep(Duration::from_millis(10));
    }
    frontier.shutdown();

    let mut delivered = Vec::new();
    for handle in consumer_handles {
        delivered.extend(handle.join().unwrap());
    }

    let unique: HashSet<_> = delivered.iter().collect();
    assert_eq!(added, distinct);
    assert_eq!(delivered.len(), distinct);
    assert_eq!(unique.len(), distinct);

    let stats = frontier.stats();
    assert_eq!(stats.urls_added, distinct);
    assert_eq!(stats.duplicates_skipped, producers * distinct - distinct);
    assert_eq!(frontier.visited_count(), distinct);
}

#[test]
fn test_batches_and_marks_from_many_threads() {
    let frontier = Arc::new(UrlFrontier::new(10_000));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                if t % 2 == 0 {
                    frontier.add_batch((0..500).map(url))
                } else {
                    for i in 250..750 {
                        frontier.mark_visited(&url(i));
                    }
                    0
                }
            })
        })
        .collect();

    let enqueued: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    // Every URL is claimed exactly once, whichever path got there first
    assert_eq!(frontier.visited_count(), 750);
    assert_eq!(enqueued, frontier.queue_size());
    assert_eq!(frontier.stats().urls_added, enqueued);
    assert!(enqueued >= 250 && enqueued <= 500);
}

#[test]
fn test_backpressure_keeps_queue_within_capacity() {
    let capacity = 16;
    let frontier = Arc::new(UrlFrontier::new(capacity));

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                for i in 0..300 {
                    frontier.try_add(&url(p * 1000 + i), Duration::from_millis(20));
                    assert!(frontier.queue_size() <= capacity);
                }
            })
        })
        .collect();

    let consumer = {
        let frontier = Arc::clone(&frontier);
        thread::spawn(move || {
            let mut popped = 0;
            while frontier.pop(Duration::from_millis(300)).is_some() {
                assert!(frontier.queue_size() <= capacity);
                thread::sleep(Duration::from_micros(200));
                popped += 1;
            }
            popped
        })
    };

    for producer in producers {
        producer.join().unwrap();
    }
    let popped = consumer.join().unwrap();

    let stats = frontier.stats();
    assert_eq!(popped + frontier.queue_size(), stats.urls_added);
    // Timed-out adds are still claimed
    assert_eq!(frontier.visited_count(), 1200);
    assert!(stats.urls_added <= 1200);
}
