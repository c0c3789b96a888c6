//! Float-packing codec and streaming message protocol for carriers that only
//! move one sample at a time — originally built for shipping arbitrary
//! binary messages down an audio-rate control-voltage connection, one
//! `f32` per callback.
//!
//! Two independent layers:
//!
//! - [`pack`]/[`sentinel`]: a byte-triple ⇔ float codec plus the six
//!   reserved sentinel values that frame a message on top of it.
//! - [`encoder`]/[`decoder`]: the streaming state machines that turn a
//!   `(mime, payload)` pair into a sequence of those floats, and back.
//!
//! Both state machines are allocation-free and safe to drive one sample per
//! call from a real-time thread; nothing in this crate blocks, allocates, or
//! performs I/O.

pub mod decoder;
pub mod encoder;
pub mod pack;
pub mod result;
pub mod sentinel;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use pack::{pack, unpack};
pub use result::{DecoderResult, EncoderResult};
pub use sentinel::Sentinel;

/// The only protocol version this crate speaks. The decoder rejects any
/// declared version outside `1..=CURRENT_VERSION`.
pub const CURRENT_VERSION: u16 = 1;

/// Largest MIME type length the wire format allows, including the NUL
/// terminator that's always appended on the wire.
pub const MAX_MIME_TYPE_SIZE: usize = 1024;

/// Largest declared payload size, in bytes: 2^23, the largest value a
/// packed float's 24-bit payload can address without colliding with the
/// sign bit's reuse in the byte layout (see [`pack`] module docs).
pub const MAX_MESSAGE_LENGTH: u32 = 1 << 23;
