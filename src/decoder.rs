//! Decoder state machine.
//!
//! Pure logic, no I/O. Consumes one float per call, resynchronizing on every
//! `MessageBegin` sentinel, and reports a status after each sample.
//! Allocation-free, O(1) per call.
//!
//! Every call first checks for exact equality against one of the six
//! sentinels; sentinels always win over whatever state the decoder happens
//! to be in. A `MessageBegin` always resets parsing state, so the decoder
//! resynchronizes on the next message even after an error or a dropped
//! sample corrupted the previous one — no recovery of the corrupted message
//! is attempted, per the framing's Non-goals.

use crate::pack::{uint16_from_float, uint32_from_float, unpack};
use crate::result::DecoderResult;
use crate::sentinel::Sentinel;
use crate::{CURRENT_VERSION, MAX_MIME_TYPE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Idle,
    /// Just saw `MessageBegin`; waiting for the first section sentinel.
    InHeader,
    InVersion,
    InSize,
    InMimeType,
    InBody,
}

/// Streaming message decoder.
///
/// The MIME buffer is embedded by value (`MAX_MIME_TYPE_SIZE` bytes); the
/// payload buffer is borrowed from the caller via
/// [`provide_data_buffer`](Decoder::provide_data_buffer) and must outlive at
/// least the `BODY_READY` signal.
pub struct Decoder<'a> {
    state: DecoderState,
    /// Whether the single expected data float for `InVersion`/`InSize` (or
    /// the MIME-length float for `InMimeType`) has already been consumed —
    /// a second one in `InVersion`/`InSize` is malformed; for `InMimeType`
    /// it just switches from "parse length" to "parse bytes".
    first_sample_consumed: bool,
    version: u16,
    data_size: u32,
    mime_buf: [u8; MAX_MIME_TYPE_SIZE],
    /// Declared MIME length, including the NUL terminator. Zero until the
    /// length float has been parsed for the current message.
    mime_len: usize,
    mime_written: usize,
    body_written: usize,
    /// Latched once a body float overflows the provided buffer, so the
    /// `EndMessage` that eventually arrives reports the error instead of a
    /// false `BODY_READY` — corruption is surfaced, never silently dropped.
    body_overflowed: bool,
    data_store: Option<&'a mut [u8]>,
}

impl<'a> Decoder<'a> {
    /// Create an idle decoder with no payload buffer installed.
    pub fn new() -> Self {
        Decoder {
            state: DecoderState::Idle,
            first_sample_consumed: false,
            version: 0,
            data_size: 0,
            mime_buf: [0u8; MAX_MIME_TYPE_SIZE],
            mime_len: 0,
            mime_written: 0,
            body_written: 0,
            body_overflowed: false,
            data_store: None,
        }
    }

    /// Install the buffer the decoder will write payload bytes into.
    /// Refuses (returns `false`) while a body is being received — the
    /// decoder will not swap buffers mid-body.
    pub fn provide_data_buffer(&mut self, buf: &'a mut [u8]) -> bool {
        if self.state == DecoderState::InBody {
            return false;
        }
        self.data_store = Some(buf);
        true
    }

    /// The MIME type of the most recently fully-parsed header. Valid from
    /// `HEADER_READY` until the next `MessageBegin`.
    pub fn mime_type(&self) -> &str {
        let len = self.mime_len.saturating_sub(1); // exclude the NUL terminator
        std::str::from_utf8(&self.mime_buf[..len]).unwrap_or("")
    }

    /// The declared payload length of the most recently fully-parsed header.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Interpret one incoming sample.
    pub fn read_float(&mut self, f: f32) -> DecoderResult {
        if let Some(sentinel) = Sentinel::from_float(f) {
            return self.handle_sentinel(sentinel);
        }
        match self.state {
            DecoderState::Idle => DecoderResult::Dormant,
            DecoderState::InHeader => DecoderResult::ParsingHeader,
            DecoderState::InVersion => self.handle_version(f),
            DecoderState::InSize => self.handle_size(f),
            DecoderState::InMimeType => self.handle_mime_type(f),
            DecoderState::InBody => self.handle_body(f),
        }
    }

    fn handle_sentinel(&mut self, sentinel: Sentinel) -> DecoderResult {
        match sentinel {
            Sentinel::MessageBegin => {
                self.state = DecoderState::InHeader;
                self.data_size = 0;
                self.mime_buf = [0u8; MAX_MIME_TYPE_SIZE];
                self.mime_len = 0;
                self.mime_written = 0;
                self.body_written = 0;
                self.body_overflowed = false;
                self.version = 0;
                self.first_sample_consumed = false;
                DecoderResult::ParsingHeader
            }
            Sentinel::Version => {
                self.state = DecoderState::InVersion;
                self.first_sample_consumed = false;
                DecoderResult::ParsingHeader
            }
            Sentinel::Size => {
                self.state = DecoderState::InSize;
                self.first_sample_consumed = false;
                DecoderResult::ParsingHeader
            }
            Sentinel::MimeType => {
                self.state = DecoderState::InMimeType;
                self.mime_len = 0;
                self.mime_written = 0;
                self.first_sample_consumed = false;
                DecoderResult::ParsingHeader
            }
            Sentinel::Body => {
                self.state = DecoderState::InBody;
                self.body_written = 0;
                self.body_overflowed = false;
                DecoderResult::HeaderReady
            }
            Sentinel::EndMessage => {
                self.state = DecoderState::Idle;
                if self.body_overflowed {
                    DecoderResult::ErrorDataTooLarge
                } else {
                    DecoderResult::BodyReady
                }
            }
        }
    }

    fn handle_version(&mut self, f: f32) -> DecoderResult {
        if self.first_sample_consumed {
            return DecoderResult::ErrorMalformedHeader;
        }
        self.first_sample_consumed = true;
        let v = uint16_from_float(f);
        self.version = v;
        if v > 0 && v as u32 <= CURRENT_VERSION as u32 {
            DecoderResult::ParsingHeader
        } else {
            DecoderResult::ErrorIncompatibleVersion
        }
    }

    fn handle_size(&mut self, f: f32) -> DecoderResult {
        if self.first_sample_consumed {
            return DecoderResult::ErrorMalformedHeader;
        }
        self.first_sample_consumed = true;
        self.data_size = uint32_from_float(f);
        DecoderResult::ParsingHeader
    }

    fn handle_mime_type(&mut self, f: f32) -> DecoderResult {
        if !self.first_sample_consumed {
            self.first_sample_consumed = true;
            let len = uint16_from_float(f) as usize;
            if len > MAX_MIME_TYPE_SIZE {
                return DecoderResult::ErrorDataTooLarge;
            }
            self.mime_len = len;
            self.mime_written = 0;
            return DecoderResult::ParsingHeader;
        }

        let remaining = self.mime_len.saturating_sub(self.mime_written);
        if remaining == 0 {
            // A float arrived after every declared MIME byte was already
            // written — the sender shouldn't have sent one.
            return DecoderResult::ErrorMalformedHeader;
        }

        let (b0, b1, b2) = unpack(f);
        let bytes = [b0, b1, b2];
        // Only the bytes the declared length actually calls for — never
        // write past `mime_len`, even on the final partial group (the
        // original C writes all 3 unconditionally and relies on the buffer
        // having been zeroed at MessageBegin to mask it). Since `mime_len`
        // was already bounded by `MAX_MIME_TYPE_SIZE` when parsed, `n` never
        // carries `mime_written` past the buffer — even for the legitimate
        // `mime_len == MAX_MIME_TYPE_SIZE` case, whose final group writes
        // fewer than 3 bytes.
        let n = remaining.min(3);
        self.mime_buf[self.mime_written..self.mime_written + n].copy_from_slice(&bytes[..n]);
        self.mime_written += n;
        DecoderResult::ParsingHeader
    }

    fn handle_body(&mut self, f: f32) -> DecoderResult {
        if self.body_overflowed {
            return DecoderResult::ErrorDataTooLarge;
        }
        let Some(store) = self.data_store.as_deref_mut() else {
            self.body_overflowed = true;
            return DecoderResult::ErrorDataTooLarge;
        };
        if self.body_written + 3 > store.len() {
            self.body_overflowed = true;
            return DecoderResult::ErrorDataTooLarge;
        }
        let (b0, b1, b2) = unpack(f);
        store[self.body_written] = b0;
        store[self.body_written + 1] = b1;
        store[self.body_written + 2] = b2;
        self.body_written += 3;
        DecoderResult::ParsingBody
    }
}

impl<'a> Default for Decoder<'a> {
    fn default() -> Self {
        Self::new()
    }
}
