use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use chanid_logging::chanid_error;

use crate::batch::{report, run_batch, ChannelEventSink};
use crate::{
    BatchId, BrowserLauncher, ChromiumLauncher, EngineEvent, ExtractionOutcome, LookupSettings,
};

/// Starts batches on background threads and reports their events on one channel.
#[derive(Clone)]
pub struct EngineHandle {
    launcher: Arc<dyn BrowserLauncher>,
    settings: Arc<LookupSettings>,
    event_tx: mpsc::Sender<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: LookupSettings) -> (Self, mpsc::Receiver<EngineEvent>) {
        let launcher = Arc::new(ChromiumLauncher::new(settings.clone()));
        Self::with_launcher(launcher, settings)
    }

    pub fn with_launcher(
        launcher: Arc<dyn BrowserLauncher>,
        settings: LookupSettings,
    ) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let handle = Self {
            launcher,
            settings: Arc::new(settings),
            event_tx,
        };
        (handle, event_rx)
    }

    /// Runs the batch to completion on a dedicated thread with its own
    /// single-threaded runtime.
    pub fn start_batch(
        &self,
        batch_id: BatchId,
        urls: Vec<String>,
    ) -> io::Result<thread::JoinHandle<()>> {
        let launcher = self.launcher.clone();
        let settings = self.settings.clone();
        let sink = ChannelEventSink::new(self.event_tx.clone());

        thread::Builder::new()
            .name(format!("chanid-batch-{batch_id}"))
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        chanid_error!("Batch {}: failed to build runtime: {}", batch_id, err);
                        for url in urls {
                            report(&sink, batch_id, ExtractionOutcome::failure(url));
                        }
                        return;
                    }
                };
                runtime.block_on(run_batch(
                    launcher.as_ref(),
                    &settings,
                    batch_id,
                    urls,
                    &sink,
                ));
            })
    }
}
