//! End-to-end tests driving an [`Encoder`] and [`Decoder`] against each
//! other, one float at a time, the way a real carrier would.

use tipsy::{Decoder, DecoderResult, Encoder, EncoderResult};

/// Drive `enc` to completion through `dec`, writing the payload into `store`.
/// Returns `(header_ready_seen, body_ready_seen)`.
fn drive<'a>(enc: &mut Encoder<'a>, dec: &mut Decoder<'a>) -> (bool, bool) {
    let mut header_ready = false;
    let mut body_ready = false;
    loop {
        let mut f = 0.0;
        let er = enc.get_next_message_float(&mut f);
        let dr = dec.read_float(f);
        header_ready |= dr == DecoderResult::HeaderReady;
        body_ready |= dr == DecoderResult::BodyReady;
        if er == EncoderResult::MessageComplete || body_ready {
            break;
        }
    }
    (header_ready, body_ready)
}

#[test]
fn short_message_roundtrip() {
    let mime = "application/text";
    let payload = b"I am the very model of a modern major general\0";

    let mut enc = Encoder::new();
    assert_eq!(
        enc.initiate_message(Some(mime), payload.len() as u32, Some(payload)),
        EncoderResult::MessageInitiated
    );

    let mut dec = Decoder::new();
    let mut store = [0u8; 64];
    dec.provide_data_buffer(&mut store);

    let (header_ready, body_ready) = drive(&mut enc, &mut dec);
    assert!(header_ready);
    assert!(body_ready);
    assert_eq!(dec.mime_type(), mime);
    assert_eq!(dec.data_size(), payload.len() as u32);
    assert_eq!(&store[..payload.len()], &payload[..]);
}

#[test]
fn buffer_capacity_matrix() {
    // The decoder only ever accepts whole 3-byte groups (src/decoder.rs's
    // `body_written + 3 > store.len()` check), so a payload needs
    // `ceil(payload_len / 3) * 3` bytes of room, not `payload_len`.
    for &capacity in &[127usize, 128, 129, 254, 255, 256] {
        for &payload_len in &[127usize, 128, 129, 254, 255, 256] {
            let payload = vec![0xAB; payload_len];
            let mut enc = Encoder::new();
            enc.initiate_message(Some("a/b"), payload_len as u32, Some(&payload));

            let mut dec = Decoder::new();
            let mut store = vec![0u8; capacity];
            dec.provide_data_buffer(&mut store);

            let (_, body_ready) = drive(&mut enc, &mut dec);
            let needed = payload_len.div_ceil(3) * 3;
            if needed <= capacity {
                assert!(
                    body_ready,
                    "capacity={capacity} payload_len={payload_len} should fit"
                );
                assert_eq!(dec.data_size(), payload_len as u32);
                assert_eq!(&store[..payload_len], &payload[..]);
            } else {
                assert!(
                    !body_ready,
                    "capacity={capacity} payload_len={payload_len} should overflow, not complete"
                );
            }
        }
    }
}

#[test]
fn strict_capacity_check_pinned_at_group_boundary() {
    // Scenario 3's near-capacity, non-multiple-of-3 points: confirm
    // BODY_READY with a correctly rounded buffer, and ERROR_DATA_TOO_LARGE
    // with a buffer exactly one byte short of the rounded size.
    for &payload_len in &[127usize, 128, 129, 254, 255, 256] {
        let needed = payload_len.div_ceil(3) * 3;
        let payload = vec![0x5Au8; payload_len];

        let mut enc = Encoder::new();
        enc.initiate_message(Some("a/b"), payload_len as u32, Some(&payload));
        let mut dec = Decoder::new();
        let mut store = vec![0u8; needed];
        dec.provide_data_buffer(&mut store);
        let (_, body_ready) = drive(&mut enc, &mut dec);
        assert!(body_ready, "payload_len={payload_len} needed={needed} should fit exactly");
        assert_eq!(&store[..payload_len], &payload[..]);

        let mut enc = Encoder::new();
        enc.initiate_message(Some("a/b"), payload_len as u32, Some(&payload));
        let mut dec = Decoder::new();
        let mut store = vec![0u8; needed - 1];
        dec.provide_data_buffer(&mut store);
        let mut saw_error = false;
        loop {
            let mut f = 0.0;
            let er = enc.get_next_message_float(&mut f);
            let dr = dec.read_float(f);
            if DecoderResult::is_error(dr) {
                saw_error = true;
            }
            assert_ne!(dr, DecoderResult::BodyReady);
            if er == EncoderResult::MessageComplete {
                break;
            }
        }
        assert!(saw_error, "payload_len={payload_len} one-short buffer should error");
    }
}

#[test]
fn oversized_payload_against_small_buffer_reports_data_too_large() {
    let payload = vec![9u8; 46];
    let mut enc = Encoder::new();
    enc.initiate_message(Some("a/b"), payload.len() as u32, Some(&payload));

    let mut dec = Decoder::new();
    let mut store = [0u8; 20];
    dec.provide_data_buffer(&mut store);

    let mut saw_error = false;
    loop {
        let mut f = 0.0;
        let er = enc.get_next_message_float(&mut f);
        let dr = dec.read_float(f);
        if DecoderResult::is_error(dr) {
            saw_error = true;
        }
        assert_ne!(dr, DecoderResult::BodyReady);
        if er == EncoderResult::MessageComplete {
            break;
        }
    }
    assert!(saw_error);
}

#[test]
fn mime_sizes_zero_through_twenty_roundtrip() {
    for n in 0..=20usize {
        let mime: String = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".chars().cycle().take(n).collect();
        let payload = b"fixed payload";

        let mut enc = Encoder::new();
        enc.initiate_message(Some(&mime), payload.len() as u32, Some(payload));

        let mut dec = Decoder::new();
        let mut store = [0u8; 64];
        dec.provide_data_buffer(&mut store);

        let (header_ready, body_ready) = drive(&mut enc, &mut dec);
        assert!(header_ready, "n={n}");
        assert!(body_ready, "n={n}");
        assert_eq!(dec.mime_type(), mime, "n={n}");
        assert_eq!(&store[..payload.len()], &payload[..], "n={n}");
    }
}

#[test]
fn terminate_mid_message_leaves_decoder_unaffected_until_next_begin() {
    let mut enc = Encoder::new();
    enc.initiate_message(Some("a/b"), 3, Some(&[1, 2, 3]));

    let mut dec = Decoder::new();
    let mut store = [0u8; 8];
    dec.provide_data_buffer(&mut store);

    // Pump a couple of header floats, then terminate the encoder instead of
    // finishing the message.
    for _ in 0..2 {
        let mut f = 0.0;
        enc.get_next_message_float(&mut f);
        dec.read_float(f);
    }
    assert_eq!(enc.terminate_current_message(), EncoderResult::MessageTerminated);

    // A fresh message on the same encoder/decoder pair frames cleanly.
    enc.initiate_message(Some("c/d"), 1, Some(&[9]));
    let mut dec2 = Decoder::new();
    let mut store2 = [0u8; 8];
    dec2.provide_data_buffer(&mut store2);
    let (header_ready, body_ready) = drive(&mut enc, &mut dec2);
    assert!(header_ready);
    assert!(body_ready);
    assert_eq!(dec2.mime_type(), "c/d");
}
