use scraper::{Html, Selector};

use crate::{FailureKind, LookupError};

/// Returns the text of the first element matching `selector` whose text is
/// not blank, or `None` if the page has no such element yet.
///
/// Blank matches are skipped on purpose: an empty banner rendered ahead of the
/// result must not end the wait early.
pub fn banner_text(html: &str, selector: &str) -> Result<Option<String>, LookupError> {
    let sel = Selector::parse(selector).map_err(|err| {
        LookupError::new(FailureKind::InvalidSelector, format!("{selector}: {err}"))
    })?;
    let doc = Html::parse_document(html);

    Ok(doc
        .select(&sel)
        .map(|node| node.text().collect::<String>())
        .find(|text| !text.trim().is_empty()))
}

/// Extracts the channel ID following the last occurrence of `marker`.
///
/// Returns `None` when the marker is absent or nothing but whitespace follows it.
pub fn parse_channel_id(text: &str, marker: &str) -> Option<String> {
    text.rsplit_once(marker)
        .map(|(_, tail)| tail.trim())
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
}
