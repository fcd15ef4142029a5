//! `range=[start,end]` query parameter and the matching `Content-Range` header.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::pagination::{Page, RangeSpec};
use crate::error::AppError;

/// Query parameters of the list endpoints.
///
/// An empty `range=` is treated like an absent one.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub range: Option<String>,
}

impl RangeQuery {
    /// Parses the optional range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the value is not `[start,end]` with
    /// two integers, or if the bounds break [`RangeSpec::new`].
    pub fn parse(&self) -> Result<Option<RangeSpec>, AppError> {
        self.range.as_deref().map(parse_range).transpose()
    }
}

fn parse_range(raw: &str) -> Result<RangeSpec, AppError> {
    let (start, end) = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|inner| inner.split_once(','))
        .ok_or_else(|| AppError::bad_request("range must be in format [start,end]"))?;

    let parse = |value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::bad_request("range values must be integers"))
    };

    RangeSpec::new(parse(start)?, parse(end)?)
}

/// Formats the `Content-Range` value describing `page` within `resource`.
///
/// `links 0-9/42` for a filled page, `links */42` for an empty one.
pub fn content_range<T>(resource: &str, page: &Page<T>) -> String {
    match page.last() {
        Some(last) => format!("{resource} {}-{last}/{}", page.start, page.total),
        None => format!("{resource} */{}", page.total),
    }
}
