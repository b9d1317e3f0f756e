use std::sync::mpsc;

use chanid_logging::{chanid_error, chanid_info};
use futures_util::StreamExt;

use crate::extract::extract_channel;
use crate::{
    BatchId, BatchProgress, BrowserLauncher, EngineEvent, ExtractionOutcome, LookupSettings,
};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &ExtractionOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Runs every URL of a batch against one shared browser session.
///
/// Each completed URL emits `ItemCompleted` followed by a unit `Progress`, in
/// completion order. If the browser cannot be launched every URL is reported
/// as failed, so the number of events always matches `urls.len()`.
pub async fn run_batch(
    launcher: &dyn BrowserLauncher,
    settings: &LookupSettings,
    batch_id: BatchId,
    urls: Vec<String>,
    sink: &dyn EventSink,
) -> BatchSummary {
    chanid_info!(
        "Batch {}: {} url(s), up to {} page(s) at once",
        batch_id,
        urls.len(),
        settings.concurrency_limit()
    );
    let mut summary = BatchSummary::default();

    let session = match launcher.launch().await {
        Ok(session) => session,
        Err(err) => {
            chanid_error!("Batch {}: {}", batch_id, err);
            for url in urls {
                let outcome = ExtractionOutcome::failure(url);
                summary.record(&outcome);
                report(sink, batch_id, outcome);
            }
            return summary;
        }
    };

    {
        let lookup = session.as_ref();
        let mut completions = futures_util::stream::iter(urls)
            .map(|url| extract_channel(lookup, url, settings))
            .buffer_unordered(settings.concurrency_limit());
        while let Some(outcome) = completions.next().await {
            summary.record(&outcome);
            report(sink, batch_id, outcome);
        }
    }
    session.close().await;

    chanid_info!(
        "Batch {} finished: {} succeeded, {} failed",
        batch_id,
        summary.succeeded,
        summary.failed
    );
    summary
}

pub(crate) fn report(sink: &dyn EventSink, batch_id: BatchId, outcome: ExtractionOutcome) {
    sink.emit(EngineEvent::ItemCompleted { batch_id, outcome });
    sink.emit(EngineEvent::Progress(BatchProgress { batch_id, delta: 1 }));
}
