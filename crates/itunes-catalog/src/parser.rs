use crate::CatalogItem;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Response body is not a JSON object")]
    NotAnObject,
    #[error("Response has no results array")]
    MissingResults,
    #[error("Search result #{0} is not a JSON object")]
    InvalidResult(usize),
}

#[derive(Default, Clone, PartialEq, Debug)]
pub struct SearchResponse {
    pub result_count: u64,
    pub results: Vec<CatalogItem>,
}

/// Decodes the body of a catalog search response.
///
/// Results keep the order in which the API returned them.
pub fn parse_search_response(raw_json: &[u8]) -> Result<SearchResponse, ParseError> {
    let mut document = match serde_json::from_slice::<Value>(raw_json)? {
        Value::Object(document) => document,
        _ => return Err(ParseError::NotAnObject),
    };

    let result_count = document
        .get("resultCount")
        .and_then(Value::as_u64)
        .unwrap_or_default();

    let raw_results = match document.remove("results") {
        Some(Value::Array(raw_results)) => raw_results,
        _ => return Err(ParseError::MissingResults),
    };

    let results = raw_results
        .into_iter()
        .enumerate()
        .map(|(index, raw_result)| match raw_result {
            Value::Object(_) => {
                serde_json::from_value(raw_result).map_err(|_| ParseError::InvalidResult(index))
            }
            _ => Err(ParseError::InvalidResult(index)),
        })
        .collect::<Result<Vec<CatalogItem>, _>>()?;

    if result_count != results.len() as u64 {
        debug!(
            result_count,
            results = results.len(),
            "Result count does not match number of results"
        );
    }

    Ok(SearchResponse {
        result_count,
        results,
    })
}
