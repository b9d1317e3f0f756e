mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use chanid_engine::{
    run_batch, BatchProgress, BatchSummary, EngineEvent, ExtractionOutcome, FailureKind,
    LookupSettings, FAILURE_SENTINEL,
};
use common::{banner, FakeLauncher, Reply, TestSink};
use pretty_assertions::assert_eq;

fn init_logging() {
    chanid_logging::initialize_for_tests();
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|url| url.to_string()).collect()
}

fn outcomes(events: &[EngineEvent]) -> Vec<ExtractionOutcome> {
    let mut outcomes: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::ItemCompleted { outcome, .. } => Some(outcome.clone()),
            _ => None,
        })
        .collect();
    outcomes.sort_by(|a, b| a.url.cmp(&b.url));
    outcomes
}

#[tokio::test]
async fn every_url_yields_one_result_and_one_progress() {
    init_logging();
    let launcher = FakeLauncher::new([
        ("https://x/a", banner("UCaaa")),
        ("https://x/b", Reply::Banner("Something went wrong".to_string())),
        ("https://x/c", Reply::Fail(FailureKind::ElementNotFound)),
    ]);
    let sink = TestSink::default();

    let summary = run_batch(
        &launcher,
        &LookupSettings::default(),
        9,
        urls(&["https://x/a", "https://x/b", "https://x/c"]),
        &sink,
    )
    .await;

    let events = sink.take();
    assert_eq!(events.len(), 6);
    assert_eq!(
        summary,
        BatchSummary {
            succeeded: 1,
            failed: 2
        }
    );
    assert_eq!(
        outcomes(&events),
        vec![
            ExtractionOutcome::success("https://x/a", "UCaaa"),
            ExtractionOutcome::failure("https://x/b"),
            ExtractionOutcome::failure("https://x/c"),
        ]
    );
    let progress: usize = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress(BatchProgress { batch_id: 9, delta }) => Some(*delta),
            _ => None,
        })
        .sum();
    assert_eq!(progress, 3);
    assert_eq!(launcher.counters.launches.load(Ordering::SeqCst), 1);
    assert!(launcher.counters.closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn each_result_is_followed_by_its_progress() {
    init_logging();
    let launcher = FakeLauncher::new([
        ("https://x/a", banner("UCaaa")),
        ("https://x/b", banner("UCbbb")),
    ]);
    let sink = TestSink::default();

    run_batch(
        &launcher,
        &LookupSettings::default(),
        1,
        urls(&["https://x/a", "https://x/b"]),
        &sink,
    )
    .await;

    for pair in sink.take().chunks(2) {
        assert!(matches!(pair[0], EngineEvent::ItemCompleted { batch_id: 1, .. }));
        assert_eq!(
            pair[1],
            EngineEvent::Progress(BatchProgress {
                batch_id: 1,
                delta: 1
            })
        );
    }
}

#[tokio::test]
async fn slow_url_times_out_without_affecting_others() {
    init_logging();
    let launcher = FakeLauncher::new([
        (
            "https://x/slow",
            Reply::Slow(Duration::from_secs(5), "チャンネルID: UClate".to_string()),
        ),
        ("https://x/a", banner("UCaaa")),
        ("https://x/b", banner("UCbbb")),
    ]);
    let settings = LookupSettings {
        page_timeout: Duration::from_millis(100),
        ..LookupSettings::default()
    };
    let sink = TestSink::default();

    run_batch(
        &launcher,
        &settings,
        2,
        urls(&["https://x/slow", "https://x/a", "https://x/b"]),
        &sink,
    )
    .await;

    assert_eq!(
        outcomes(&sink.take()),
        vec![
            ExtractionOutcome::success("https://x/a", "UCaaa"),
            ExtractionOutcome::success("https://x/b", "UCbbb"),
            ExtractionOutcome::failure("https://x/slow"),
        ]
    );
}

#[tokio::test]
async fn pages_in_flight_never_exceed_limit() {
    init_logging();
    let all = [
        "https://x/1",
        "https://x/2",
        "https://x/3",
        "https://x/4",
        "https://x/5",
        "https://x/6",
    ];
    let launcher = FakeLauncher::new(all.map(|url| {
        (
            url,
            Reply::Slow(Duration::from_millis(30), "チャンネルID: UCx".to_string()),
        )
    }));
    let settings = LookupSettings {
        max_concurrent_pages: 2,
        ..LookupSettings::default()
    };
    let sink = TestSink::default();

    let summary = run_batch(&launcher, &settings, 3, urls(&all), &sink).await;

    assert_eq!(summary.succeeded, 6);
    assert_eq!(launcher.counters.lookups.load(Ordering::SeqCst), 6);
    assert_eq!(launcher.counters.max_in_flight.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn launch_failure_reports_every_url_as_failed() {
    init_logging();
    let launcher = FakeLauncher::failing();
    let sink = TestSink::default();

    let summary = run_batch(
        &launcher,
        &LookupSettings::default(),
        4,
        urls(&["https://x/a", "https://x/b"]),
        &sink,
    )
    .await;

    let events = sink.take();
    assert_eq!(
        summary,
        BatchSummary {
            succeeded: 0,
            failed: 2
        }
    );
    assert_eq!(events.len(), 4);
    assert!(outcomes(&events)
        .iter()
        .all(|outcome| !outcome.success && outcome.channel_id == FAILURE_SENTINEL));
    assert_eq!(launcher.counters.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn timed_out_pages_are_closed_before_next_page_opens() {
    init_logging();
    let hang = || Reply::Slow(Duration::from_secs(5), "チャンネルID: UClate".to_string());
    let launcher = FakeLauncher::new([
        ("https://x/1", hang()),
        ("https://x/2", hang()),
        ("https://x/3", hang()),
    ]);
    let settings = LookupSettings {
        page_timeout: Duration::from_millis(50),
        max_concurrent_pages: 1,
        ..LookupSettings::default()
    };
    let sink = TestSink::default();

    let summary = run_batch(
        &launcher,
        &settings,
        6,
        urls(&["https://x/1", "https://x/2", "https://x/3"]),
        &sink,
    )
    .await;

    assert_eq!(summary.failed, 3);
    assert_eq!(launcher.counters.pages_opened.load(Ordering::SeqCst), 3);
    assert_eq!(launcher.counters.pages_closed.load(Ordering::SeqCst), 3);
    assert_eq!(launcher.counters.open_pages.load(Ordering::SeqCst), 0);
    assert_eq!(launcher.counters.max_open_pages.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn pages_are_closed_after_success_and_failure() {
    init_logging();
    let launcher = FakeLauncher::new([
        ("https://x/a", banner("UCaaa")),
        ("https://x/b", Reply::Fail(FailureKind::Navigation)),
    ]);
    let sink = TestSink::default();

    run_batch(
        &launcher,
        &LookupSettings::default(),
        7,
        urls(&["https://x/a", "https://x/b"]),
        &sink,
    )
    .await;

    assert_eq!(launcher.counters.pages_opened.load(Ordering::SeqCst), 2);
    assert_eq!(launcher.counters.pages_closed.load(Ordering::SeqCst), 2);
}
