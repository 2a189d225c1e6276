// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Instant;

#[tokio::test]
async fn system_clock_sleep_waits_for_duration() {
    let clock = SystemClock;
    let start = Instant::now();
    clock.sleep(Duration::from_millis(5)).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(5));
}

#[tokio::test]
async fn fake_sleep_returns_without_waiting() {
    let clock = FakeClock::new();
    let real = Instant::now();

    clock.sleep(Duration::from_secs(3600)).await.unwrap();

    assert_eq!(clock.total_slept(), Duration::from_secs(3600));
    assert!(real.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn fake_clock_clones_share_sleep_totals() {
    let clock = FakeClock::new();
    let other = clock.clone();

    other.sleep(Duration::from_millis(30)).await.unwrap();

    assert_eq!(clock.total_slept(), Duration::from_millis(30));
}

#[tokio::test]
async fn fake_sleep_reports_pending_interrupts() {
    let clock = FakeClock::new();
    clock.interrupt_next(1);

    let first = clock.sleep(Duration::from_millis(15)).await;
    let second = clock.sleep(Duration::from_millis(15)).await;

    assert_eq!(first, Err(WorkInterrupted(Duration::from_millis(15))));
    assert_eq!(second, Ok(()));
    assert_eq!(clock.total_slept(), Duration::from_millis(15));
}
