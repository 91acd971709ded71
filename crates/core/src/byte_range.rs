//! HTTP `Range` header parsing and resolution against a file size.
//!
//! Only single ranges in the `bytes` unit are supported, which is all a
//! `<video>` element issues while seeking. Multi-range requests are
//! rejected as malformed.

use crate::error::CoreError;

/// Value of the `Accept-Ranges` header sent with every media response.
pub const ACCEPT_RANGES_BYTES: &str = "bytes";

/// A parsed, not yet size-checked, `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// `bytes=<start>-` or `bytes=<start>-<end>`.
    FromStart { start: u64, end: Option<u64> },
    /// `bytes=-<len>`: the final `len` bytes.
    Suffix { len: u64 },
}

/// An inclusive byte span inside a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes in the span.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for a file of `size` bytes.
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{size}", self.start, self.end)
    }
}

/// How a media request should be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServePlan {
    /// 200 with the entire file.
    Full,
    /// 206 with the given span.
    Partial(ByteRange),
}

/// `Content-Range` header value sent with a 416 response.
pub fn unsatisfiable_content_range(size: u64) -> String {
    format!("bytes */{size}")
}

/// Parse a `Range` header value.
///
/// Returns [`CoreError::Validation`] for anything that is not a single
/// `bytes` range.
pub fn parse_range_header(value: &str) -> Result<RangeSpec, CoreError> {
    let malformed = || CoreError::Validation(format!("Malformed Range header: '{value}'"));

    let spec = value.trim().strip_prefix("bytes=").ok_or_else(malformed)?;
    if spec.contains(',') {
        return Err(CoreError::Validation(
            "Multiple byte ranges are not supported".to_string(),
        ));
    }

    let (start, end) = spec.trim().split_once('-').ok_or_else(malformed)?;
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() {
        let len = end.parse::<u64>().map_err(|_| malformed())?;
        return Ok(RangeSpec::Suffix { len });
    }

    let start = start.parse::<u64>().map_err(|_| malformed())?;
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse::<u64>().map_err(|_| malformed())?)
    };
    Ok(RangeSpec::FromStart { start, end })
}

/// Resolve a parsed range against a file of `size` bytes.
///
/// An end past the last byte is clamped. A start past the last byte, an
/// inverted range, an empty suffix, or any range on an empty file yields
/// [`CoreError::RangeNotSatisfiable`].
pub fn resolve_range(spec: RangeSpec, size: u64) -> Result<ByteRange, CoreError> {
    let unsatisfiable = CoreError::RangeNotSatisfiable { size };
    if size == 0 {
        return Err(unsatisfiable);
    }
    let last = size - 1;

    match spec {
        RangeSpec::FromStart { start, end } => {
            if start > last {
                return Err(unsatisfiable);
            }
            let end = end.map(|e| e.min(last)).unwrap_or(last);
            if start > end {
                return Err(unsatisfiable);
            }
            Ok(ByteRange { start, end })
        }
        RangeSpec::Suffix { len } => {
            if len == 0 {
                return Err(unsatisfiable);
            }
            Ok(ByteRange {
                start: size.saturating_sub(len),
                end: last,
            })
        }
    }
}

/// Decide between a full and a partial response for an optional `Range`
/// header. A range that spans the whole file is served as a full response.
pub fn plan_response(range_header: Option<&str>, size: u64) -> Result<ServePlan, CoreError> {
    let Some(value) = range_header else {
        return Ok(ServePlan::Full);
    };

    let range = resolve_range(parse_range_header(value)?, size)?;
    if range.start == 0 && range.end == size - 1 {
        Ok(ServePlan::Full)
    } else {
        Ok(ServePlan::Partial(range))
    }
}
