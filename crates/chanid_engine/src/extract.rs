use chanid_logging::{chanid_debug, chanid_warn};

use crate::banner::parse_channel_id;
use crate::{ChannelLookup, ExtractionOutcome, FailureKind, LookupError, LookupSettings};

/// Resolves one channel URL. Every failure is downgraded to the failure sentinel.
pub async fn extract_channel(
    lookup: &dyn ChannelLookup,
    url: String,
    settings: &LookupSettings,
) -> ExtractionOutcome {
    match resolve(lookup, &url, settings).await {
        Ok(channel_id) => {
            chanid_debug!("Resolved {} -> {}", url, channel_id);
            ExtractionOutcome::success(url, channel_id)
        }
        Err(err) => {
            chanid_warn!("Lookup failed for {}: {}", url, err);
            ExtractionOutcome::failure(url)
        }
    }
}

async fn resolve(
    lookup: &dyn ChannelLookup,
    url: &str,
    settings: &LookupSettings,
) -> Result<String, LookupError> {
    let page = tokio::time::timeout(settings.page_timeout, lookup.open_page())
        .await
        .map_err(|_| timed_out(settings))??;

    // The page is closed whether the submission succeeds, fails or times out.
    let submitted = tokio::time::timeout(settings.page_timeout, page.submit(url))
        .await
        .map_err(|_| timed_out(settings))
        .and_then(|result| result);
    page.close().await;
    let text = submitted?;

    parse_channel_id(&text, &settings.id_marker).ok_or_else(|| {
        LookupError::new(
            FailureKind::MarkerMissing,
            format!("{:?} not found in {:?}", settings.id_marker, text.trim()),
        )
    })
}

fn timed_out(settings: &LookupSettings) -> LookupError {
    LookupError::new(
        FailureKind::Timeout,
        format!("no result within {:?}", settings.page_timeout),
    )
}
