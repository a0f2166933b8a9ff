//! URL encoding utilities for constructing safe API paths.
//!
//! Forwarder IDs and log type names are interpolated into request paths, so
//! they are percent-encoded as a single path segment. A stray `/` or `?` in a
//! caller-supplied value would otherwise address a different resource.
//!
//! # Example
//!
//! ```
//! use secops_client::endpoints::url_encoding::encode_path_segment;
//!
//! let encoded = encode_path_segment("forwarders/evil");
//! assert_eq!(encoded, "forwarders%2Fevil");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 reserved characters plus the ones that change how
/// Google APIs route a path. `:` is left alone since custom methods such as
/// `logs:import` are appended by the client itself, never by callers.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
///
/// # Examples
///
/// ```
/// use secops_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("WINEVTLOG"), "WINEVTLOG");
/// assert_eq!(encode_path_segment("a b"), "a%20b");
/// assert_eq!(encode_path_segment("50%"), "50%25");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
