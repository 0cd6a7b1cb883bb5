//! Timed-text (json3) transcript parsing

use serde::Deserialize;

use crate::error::Result;
use crate::youtube::types::CaptionSegment;

#[derive(Debug, Deserialize)]
pub struct TimedTextResponse {
    #[serde(default)]
    pub events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
pub struct TimedTextEvent {
    #[serde(rename = "tStartMs")]
    pub t_start_ms: Option<u64>,
    #[serde(rename = "dDurationMs")]
    pub d_duration_ms: Option<u64>,
    pub segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
pub struct TimedTextSeg {
    pub utf8: Option<String>,
}

/// Build the json3 URL for a caption track's base URL.
///
/// Any `fmt` already present is replaced. `pot` and the client name `c` are
/// attached when a token is available.
pub fn timedtext_url(base_url: &str, po_token: Option<&str>, client_name: &str) -> Result<String> {
    let mut url = url::Url::parse(base_url)
        .map_err(|e| crate::error::ExtractError::Player(format!("bad caption URL: {}", e)))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt" && k != "pot" && k != "c")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("fmt", "json3");
        if let Some(token) = po_token {
            pairs.append_pair("pot", token);
            pairs.append_pair("c", client_name);
        }
    }

    Ok(url.into())
}

/// Parse a json3 body into caption segments, keeping source order.
///
/// Events without `segs` are window/style definitions and carry no cue.
/// Pure newline events are line breaks inside auto-generated tracks.
pub fn parse_json3(body: &str) -> Result<Vec<CaptionSegment>> {
    if body.trim().is_empty() {
        tracing::warn!("Empty timed-text response");
        return Ok(Vec::new());
    }

    let response: TimedTextResponse = serde_json::from_str(body)?;

    let segments = response
        .events
        .into_iter()
        .filter_map(|event| {
            let start_ms = event.t_start_ms?;
            let segs = event.segs?;

            let mut text: Option<String> = None;
            for seg in segs {
                if let Some(utf8) = seg.utf8 {
                    text.get_or_insert_with(String::new).push_str(&utf8);
                }
            }
            if text.as_deref() == Some("\n") {
                return None;
            }

            let end_ms = start_ms.saturating_add(event.d_duration_ms.unwrap_or(0));
            Some(CaptionSegment {
                start: start_ms as f64 / 1000.0,
                end: end_ms as f64 / 1000.0,
                text,
            })
        })
        .collect();

    Ok(segments)
}
