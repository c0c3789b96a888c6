//! Tagged-enum results for the encoder and decoder, with a high-bit error
//! flag — the same shape as the original C++ `enum ... : uint16_t { ...,
//! ERROR_UNKNOWN = 1 << 7, ... }`, so a single bit test distinguishes success
//! from failure without a `match` over every variant.

/// Outcome of an [`Encoder`](crate::encoder::Encoder) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum EncoderResult {
    /// No message active; nothing was written.
    Dormant = 0x0000,
    /// `initiate_message` succeeded; encoder is now `StartMessage`.
    MessageInitiated = 0x0001,
    /// One float emitted; more remain.
    EncodingMessage = 0x0002,
    /// This call emitted the final `EndMessage` sentinel; encoder is dormant
    /// again.
    MessageComplete = 0x0003,
    /// `terminate_current_message` succeeded.
    MessageTerminated = 0x0004,

    /// `initiate_message` was called with no MIME type.
    ErrorMissingMimeType = 0x0080,
    /// `initiate_message` was called with a nonzero declared size but no
    /// backing data.
    ErrorMissingData = 0x0081,
    /// Declared payload size exceeds [`MAX_MESSAGE_LENGTH`](crate::MAX_MESSAGE_LENGTH).
    ErrorMessageTooLarge = 0x0082,
    /// MIME type (including its NUL terminator) exceeds
    /// [`MAX_MIME_TYPE_SIZE`](crate::MAX_MIME_TYPE_SIZE).
    ErrorMimeTypeTooLarge = 0x0083,
    /// `initiate_message` was called while a message was already active.
    ErrorMessageAlreadyActive = 0x0084,
    /// `terminate_current_message` was called while dormant.
    ErrorNoMessageActive = 0x0085,
}

impl EncoderResult {
    const ERROR_FLAG: u16 = 0x0080;

    /// True iff `self` represents a failure.
    #[inline]
    pub fn is_error(self) -> bool {
        (self as u16) & Self::ERROR_FLAG != 0
    }
}

/// Outcome of a [`Decoder`](crate::decoder::Decoder) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum DecoderResult {
    /// Idle; the sample was not part of an active message.
    Dormant = 0x0000,
    /// Somewhere inside the header (version/size/mime-type sections).
    ParsingHeader = 0x0001,
    /// Returned exactly once per message: the MIME buffer is fully
    /// populated and `mime_type()`/`data_size()` are now valid.
    HeaderReady = 0x0002,
    /// Somewhere inside the body.
    ParsingBody = 0x0003,
    /// Returned exactly once per message: the payload buffer holds the full
    /// body (padded with trailing zeros in the final group, per
    /// `data_size()`).
    BodyReady = 0x0004,

    /// The declared protocol version is unsupported.
    ErrorIncompatibleVersion = 0x0080,
    /// A single-float header section received a second data float.
    ErrorMalformedHeader = 0x0081,
    /// Payload or MIME type exceeds the provided capacity.
    ErrorDataTooLarge = 0x0082,
    /// Fallthrough; should be unreachable.
    ErrorUnknown = 0x0083,
}

impl DecoderResult {
    const ERROR_FLAG: u16 = 0x0080;

    /// True iff `r` represents a failure. Exposed as an associated function
    /// (rather than only a method) to mirror the original's `static
    /// isError`.
    #[inline]
    pub fn is_error(r: DecoderResult) -> bool {
        (r as u16) & Self::ERROR_FLAG != 0
    }
}
