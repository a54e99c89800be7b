//! JSON shape of the Analysis Service response.
use serde::{Deserialize, Deserializer};
use serde_json::error::Category;

use crate::{AnalysisError, AnalysisReport, FailureKind, MatchedJob};

#[derive(Debug, Deserialize)]
struct WireResponse {
    matched_jobs: Vec<WireJob>,
    // The service types this as optional; null reads as empty, absent is an error.
    #[serde(deserialize_with = "null_as_empty")]
    cover_letter: String,
}

#[derive(Debug, Deserialize)]
struct WireJob {
    id: i64,
    title: String,
    company: String,
    location: String,
    description: String,
    similarity: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn decode_report(body: &[u8]) -> Result<AnalysisReport, AnalysisError> {
    let wire: WireResponse = serde_json::from_slice(body).map_err(|err| {
        let kind = match err.classify() {
            Category::Data => FailureKind::MalformedPayload,
            Category::Io | Category::Syntax | Category::Eof => FailureKind::Unparseable,
        };
        AnalysisError::new(kind, err.to_string())
    })?;

    Ok(AnalysisReport {
        matched_jobs: wire
            .matched_jobs
            .into_iter()
            .map(|job| MatchedJob {
                id: job.id,
                title: job.title,
                company: job.company,
                location: job.location,
                description: job.description,
                similarity: job.similarity,
            })
            .collect(),
        cover_letter: wire.cover_letter,
    })
}
