//! Protocol sentinels — reserved float values that never collide with a
//! [`pack`](crate::pack::pack)-produced data float.
//!
//! ```text
//! max_encoded() < MessageBegin < Version < Size < MimeType < Body < EndMessage < 10.0
//!      ~0.9999994    11.0         12.0     13.0     14.0      15.0     16.0
//! ```
//!
//! Sentinel comparison is exact float equality — each value is a small
//! integer exactly representable in binary32, and the carrier is assumed
//! lossless, so bit-equal comparison is correct; no tolerance is used.

use crate::pack::max_encoded;

/// A reserved float value that introduces or terminates a protocol section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Sentinel {
    MessageBegin = 0,
    Version = 1,
    Size = 2,
    MimeType = 3,
    Body = 4,
    EndMessage = 5,
}

impl Sentinel {
    /// The float value of this sentinel.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Sentinel::MessageBegin => 11.0,
            Sentinel::Version => 12.0,
            Sentinel::Size => 13.0,
            Sentinel::MimeType => 14.0,
            Sentinel::Body => 15.0,
            Sentinel::EndMessage => 16.0,
        }
    }

    /// Classify `f` as a sentinel, if it is exactly one.
    #[inline]
    pub fn from_float(f: f32) -> Option<Sentinel> {
        // Exact equality by design — see module docs.
        if f == Sentinel::MessageBegin.value() {
            Some(Sentinel::MessageBegin)
        } else if f == Sentinel::Version.value() {
            Some(Sentinel::Version)
        } else if f == Sentinel::Size.value() {
            Some(Sentinel::Size)
        } else if f == Sentinel::MimeType.value() {
            Some(Sentinel::MimeType)
        } else if f == Sentinel::Body.value() {
            Some(Sentinel::Body)
        } else if f == Sentinel::EndMessage.value() {
            Some(Sentinel::EndMessage)
        } else {
            None
        }
    }

    /// Debug display name, e.g. for logging a decoded stream outside the hot
    /// path.
    #[inline]
    pub fn display_name(self) -> &'static str {
        match self {
            Sentinel::MessageBegin => "MessageBegin",
            Sentinel::Version => "Version",
            Sentinel::Size => "Size",
            Sentinel::MimeType => "MimeType",
            Sentinel::Body => "Body",
            Sentinel::EndMessage => "EndMessage",
        }
    }
}

/// Debug label for `f`; `"NOT_A_SENTINEL"` if `f` isn't one of the six
/// reserved values.
#[inline]
pub fn sentinel_display_name(f: f32) -> &'static str {
    match Sentinel::from_float(f) {
        Some(s) => s.display_name(),
        None => "NOT_A_SENTINEL",
    }
}

/// True iff `f` is a sentinel or a valid data-encoding float (i.e. `f` is
/// something this protocol could legitimately see on the wire).
#[inline]
pub fn is_valid_protocol_encoding(f: f32) -> bool {
    Sentinel::from_float(f).is_some() || crate::pack::is_valid_data_encoding(f)
}
