//! Encoder state machine.
//!
//! Pure logic, no I/O. Given a MIME type and a payload, emits one float per
//! call to [`Encoder::get_next_message_float`] until the whole message has
//! been framed. Allocation-free, O(1) per call, safe to drive from a
//! real-time callback.
//!
//! ## Wire sequence
//!
//! ```text
//! MessageBegin ×3
//!   → Version sentinel, 1 float (u16 version, little-endian, 0-padded)
//!   → Size sentinel, 1 float (u24 payload length)
//!   → MimeType sentinel, 1 float (u16 mime length incl. NUL), ⌈mime_len/3⌉ floats
//!   → Body sentinel, ⌈payload_len/3⌉ floats
//!   → EndMessage
//! ```
//!
//! The final, partial group of a variable-length section is zero-padded on
//! the right; the receiver recovers true lengths from the `Size` and
//! `MimeType` length fields, so the padding is harmless.

use crate::pack::pack;
use crate::result::EncoderResult;
use crate::sentinel::Sentinel;
use crate::{CURRENT_VERSION, MAX_MESSAGE_LENGTH, MAX_MIME_TYPE_SIZE};

/// Encoder state. `pos` (tracked on [`Encoder`], not here) resets to zero on
/// every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncoderState {
    NoMessage,
    StartMessage,
    HeaderVersion,
    HeaderSize,
    HeaderMimeType,
    Body,
    EndMessage,
}

/// Streaming message encoder.
///
/// Borrows the caller's MIME string and payload for the duration of the
/// transmission — from [`initiate_message`](Encoder::initiate_message) to
/// whichever call returns `MESSAGE_COMPLETE` or `MESSAGE_TERMINATED`. Those
/// buffers must outlive that final call.
#[derive(Debug)]
pub struct Encoder<'a> {
    state: EncoderState,
    pos: usize,
    mime: Option<&'a str>,
    /// `strlen(mime) + 1`, including the NUL terminator carried on the wire.
    mime_len: usize,
    data: Option<&'a [u8]>,
    /// Declared payload length. Kept independent of `data`'s actual slice
    /// length, mirroring the original C API's decoupled pointer + size pair
    /// — this is what makes a declared-nonzero/no-buffer mismatch
    /// (`ERROR_MISSING_DATA`) expressible at all.
    data_bytes: usize,
}

impl<'a> Default for Encoder<'a> {
    fn default() -> Self {
        Encoder {
            state: EncoderState::NoMessage,
            pos: 0,
            mime: None,
            mime_len: 0,
            data: None,
            data_bytes: 0,
        }
    }
}

impl<'a> Encoder<'a> {
    /// Create a dormant encoder.
    pub fn new() -> Self {
        Self::default()
    }

    fn set_state(&mut self, s: EncoderState) {
        self.state = s;
        self.pos = 0;
    }

    fn reset_dormant(&mut self) {
        self.state = EncoderState::NoMessage;
        self.pos = 0;
        self.mime = None;
        self.data = None;
    }

    /// Begin transmitting a message.
    ///
    /// `mime` must be `Some`; `data` must be `Some` unless `data_bytes == 0`.
    /// Both are borrowed until the transmission completes or is terminated.
    pub fn initiate_message(
        &mut self,
        mime: Option<&'a str>,
        data_bytes: u32,
        data: Option<&'a [u8]>,
    ) -> EncoderResult {
        let Some(mime) = mime else {
            return EncoderResult::ErrorMissingMimeType;
        };
        if data.is_none() && data_bytes > 0 {
            return EncoderResult::ErrorMissingData;
        }
        if data_bytes > MAX_MESSAGE_LENGTH {
            return EncoderResult::ErrorMessageTooLarge;
        }
        let mime_len = mime.len() + 1;
        if mime_len > MAX_MIME_TYPE_SIZE {
            return EncoderResult::ErrorMimeTypeTooLarge;
        }
        if self.state != EncoderState::NoMessage {
            return EncoderResult::ErrorMessageAlreadyActive;
        }

        self.mime = Some(mime);
        self.mime_len = mime_len;
        self.data = data;
        self.data_bytes = data_bytes as usize;
        self.set_state(EncoderState::StartMessage);

        EncoderResult::MessageInitiated
    }

    /// Byte `i` of the MIME section (string bytes, then a single NUL), or 0
    /// past the end — defensive against a declared length that outruns the
    /// actual string (can't happen via `initiate_message`, but costs
    /// nothing to keep total).
    fn mime_byte(&self, i: usize) -> u8 {
        let bytes = self.mime.unwrap_or("").as_bytes();
        bytes.get(i).copied().unwrap_or(0)
    }

    /// Byte `i` of the payload, or 0 past the end of the caller's slice —
    /// the declared `data_bytes` is authoritative, not `data`'s actual
    /// length.
    fn data_byte(&self, i: usize) -> u8 {
        self.data
            .and_then(|d| d.get(i).copied())
            .unwrap_or(0)
    }

    /// Emit exactly one float. Returns `DORMANT` while idle, `ENCODING_MESSAGE`
    /// for every float but the last, and `MESSAGE_COMPLETE` on the call that
    /// emits the final `EndMessage` sentinel.
    pub fn get_next_message_float(&mut self, out: &mut f32) -> EncoderResult {
        match self.state {
            EncoderState::NoMessage => {
                *out = 0.0;
                EncoderResult::Dormant
            }
            EncoderState::StartMessage => {
                *out = Sentinel::MessageBegin.value();
                self.pos += 1;
                if self.pos == 3 {
                    self.set_state(EncoderState::HeaderVersion);
                }
                EncoderResult::EncodingMessage
            }
            EncoderState::HeaderVersion => {
                if self.pos == 0 {
                    *out = Sentinel::Version.value();
                    self.pos += 1;
                } else {
                    *out = pack(CURRENT_VERSION as u8, (CURRENT_VERSION >> 8) as u8, 0);
                    self.set_state(EncoderState::HeaderSize);
                }
                EncoderResult::EncodingMessage
            }
            EncoderState::HeaderSize => {
                if self.pos == 0 {
                    *out = Sentinel::Size.value();
                    self.pos += 1;
                } else {
                    let d = self.data_bytes as u32;
                    *out = pack(d as u8, (d >> 8) as u8, (d >> 16) as u8);
                    self.set_state(EncoderState::HeaderMimeType);
                }
                EncoderResult::EncodingMessage
            }
            EncoderState::HeaderMimeType => {
                if self.pos == 0 {
                    *out = Sentinel::MimeType.value();
                    self.pos += 1;
                } else if self.pos == 1 {
                    let ml = self.mime_len as u32;
                    *out = pack(ml as u8, (ml >> 8) as u8, 0);
                    self.pos += 1;
                } else {
                    // Zero-based group index — no relation to `pos - 2` in
                    // the original C, which reused `pos` as a byte offset
                    // and underflowed `mimeTypeSize - 3` for short MIME
                    // strings. Computing the offset explicitly avoids that.
                    let group = self.pos - 2;
                    let offset = group * 3;
                    *out = pack(
                        self.mime_byte(offset),
                        self.mime_byte(offset + 1),
                        self.mime_byte(offset + 2),
                    );
                    self.pos += 1;
                    if offset + 3 >= self.mime_len {
                        self.set_state(EncoderState::Body);
                    }
                }
                EncoderResult::EncodingMessage
            }
            EncoderState::Body => {
                if self.pos == 0 {
                    *out = Sentinel::Body.value();
                    self.pos += 1;
                    if self.data_bytes == 0 {
                        self.set_state(EncoderState::EndMessage);
                    }
                } else {
                    let group = self.pos - 1;
                    let offset = group * 3;
                    *out = pack(
                        self.data_byte(offset),
                        self.data_byte(offset + 1),
                        self.data_byte(offset + 2),
                    );
                    self.pos += 1;
                    if offset + 3 >= self.data_bytes {
                        self.set_state(EncoderState::EndMessage);
                    }
                }
                EncoderResult::EncodingMessage
            }
            EncoderState::EndMessage => {
                *out = Sentinel::EndMessage.value();
                self.reset_dormant();
                EncoderResult::MessageComplete
            }
        }
    }

    /// Abort the in-progress message, if any, and release the borrowed
    /// buffers immediately.
    pub fn terminate_current_message(&mut self) -> EncoderResult {
        if self.state == EncoderState::NoMessage {
            return EncoderResult::ErrorNoMessageActive;
        }
        self.reset_dormant();
        EncoderResult::MessageTerminated
    }
}
