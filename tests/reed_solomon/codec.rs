//! Reed-Solomon Codec Tests
//!
//! End-to-end encode/decode scenarios, correction limits and the index
//! convention (position 0 = first symbol = highest degree).

use rsecc::reed_solomon::{ErrorKind, GaloisField, ReedSolomon, RsError};
use std::sync::Arc;

const HELLO: &[u8] = b"Hello World!";

fn lorem() -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. Duis congue, quam eget \
      imperdiet sollicitudin, libero ipsum tincidunt massa, at vulputate leo erat ut urna."
        .to_vec()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_hello_world_two_errors() {
    let rs = ReedSolomon::new(8, 5).unwrap();
    assert_eq!(rs.field().primitive_polynomial(), 285);

    let mut encoded = rs.encode(HELLO).unwrap();
    assert_eq!(encoded.len(), 17);
    assert_eq!(&encoded[..12], HELLO);

    encoded[0] = 0xFF;
    encoded[1] = 0xFF;

    let decoded = rs.decode(&encoded, None).unwrap();
    assert_eq!(decoded.message, HELLO);
    assert_eq!(decoded.errors_found, 2);
}

#[test]
fn test_hello_world_known_erasure() {
    let rs = ReedSolomon::new(8, 5).unwrap();
    let mut encoded = rs.encode(HELLO).unwrap();
    encoded[11] = 0x00;

    let decoded = rs.decode(&encoded, Some(&[11][..])).unwrap();
    assert_eq!(decoded.message, HELLO);
    assert_eq!(decoded.errors_found, 0);
}

// ============================================================================
// Correction limits
// ============================================================================

#[test]
fn test_corrects_up_to_half_nsym_errors() {
    let rs = ReedSolomon::new(8, 16).unwrap();
    let data = lorem();
    let encoded = rs.encode(&data).unwrap();

    let mut corrupted = encoded.clone();
    for (i, position) in [0, 9, 27, 33, 61, 100, 140, encoded.len() - 1]
        .into_iter()
        .enumerate()
    {
        corrupted[position] ^= (i as u8 + 1) * 17;
    }

    let decoded = rs.decode(&corrupted, None).unwrap();
    assert_eq!(decoded.message, data);
    assert_eq!(decoded.errors_found, 8);
}

#[test]
fn test_corrects_nsym_erasures() {
    let rs = ReedSolomon::new(8, 16).unwrap();
    let data = lorem();
    let encoded = rs.encode(&data).unwrap();

    let positions: Vec<usize> = (0..16).map(|i| i * 9 + 2).collect();
    let mut erased = encoded.clone();
    for &p in &positions {
        erased[p] = 0;
    }

    let decoded = rs.decode(&erased, Some(positions.as_slice())).unwrap();
    assert_eq!(decoded.message, data);
    assert_eq!(decoded.erasures, 16);

    let mut too_many = positions.clone();
    too_many.push(150);
    let err = rs.decode(&erased, Some(too_many.as_slice())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn test_mixed_errors_and_erasures_at_bound() {
    // 2·5 + 6 = 16 = nsym
    let rs = ReedSolomon::new(8, 16).unwrap();
    let data = lorem();
    let encoded = rs.encode(&data).unwrap();

    let erasures = [1, 2, 3, 50, 51, 120];
    let errors = [10, 70, 90, 130, 160];

    let mut damaged = encoded.clone();
    for &p in erasures.iter().chain(&errors) {
        damaged[p] ^= 0xC3;
    }

    let decoded = rs.decode(&damaged, Some(&erasures[..])).unwrap();
    assert_eq!(decoded.message, data);
    assert_eq!(decoded.errors_found, 5);
    assert_eq!(decoded.erasures, 6);
}

#[test]
fn test_errors_beyond_capacity_are_never_silently_accepted() {
    let rs = ReedSolomon::new(8, 4).unwrap();
    let encoded = rs.encode(HELLO).unwrap();

    let mut corrupted = encoded.clone();
    for p in [0, 4, 8] {
        corrupted[p] ^= 0x42;
    }

    match rs.decode(&corrupted, None) {
        Ok(decoded) => {
            // Miscorrection to a different codeword is allowed, a wrong
            // payload passing as the original is not
            assert_ne!(decoded.message, HELLO);
            let reencoded = rs.encode(&decoded.message).unwrap();
            assert!(!rs.is_corrupted(&reencoded));
        }
        Err(e) => assert!(e.is_uncorrectable()),
    }
}

#[test]
fn test_locator_without_roots_is_reported() {
    // Two errors that cancel in S(1) leave a constant error locator
    let rs = ReedSolomon::new(8, 2).unwrap();
    let mut corrupted = rs.encode(HELLO).unwrap();
    corrupted[3] ^= 202;
    corrupted[9] ^= 240;

    let err = rs.decode(&corrupted, None).unwrap_err();
    assert_eq!(err, RsError::UnableToLocateErrors);
    assert_eq!(err.kind(), ErrorKind::Consistency);
    assert!(rs.is_corrupted(&corrupted));
}

#[test]
fn test_miscorrection_caught_by_syndrome_recheck() {
    // Three errors that look like one; fixing that one symbol is not a codeword
    let rs = ReedSolomon::new(8, 4).unwrap();
    let encoded = rs.encode(HELLO).unwrap();
    assert_eq!(&encoded[12..], &[249, 99, 3, 152]);

    let mut corrupted = encoded.clone();
    corrupted[4] ^= 28;
    corrupted[9] ^= 79;
    corrupted[10] ^= 155;

    let err = rs.decode(&corrupted, None).unwrap_err();
    assert_eq!(err, RsError::CorrectionFailed);
    assert!(err.is_uncorrectable());

    let mut corrupted = encoded.clone();
    corrupted[1] ^= 248;
    corrupted[2] ^= 126;
    corrupted[5] ^= 151;
    assert_eq!(
        rs.decode(&corrupted, None).unwrap_err(),
        RsError::CorrectionFailed
    );
}

#[test]
fn test_too_many_errors_reports_counts() {
    let rs = ReedSolomon::new(8, 2).unwrap();
    let mut corrupted = rs.encode(HELLO).unwrap();
    corrupted[4] ^= 75;
    corrupted[8] ^= 75;

    assert_eq!(
        rs.decode(&corrupted, None).unwrap_err(),
        RsError::TooManyErrors {
            errors: 2,
            erasures: 0,
            nsym: 2
        }
    );
}

// ============================================================================
// Index convention
// ============================================================================

#[test]
fn test_first_and_last_symbol() {
    let rs = ReedSolomon::new(8, 2).unwrap();
    let encoded = rs.encode(HELLO).unwrap();
    let last = encoded.len() - 1;

    for position in [0, last] {
        let mut corrupted = encoded.clone();
        corrupted[position] ^= 0x01;
        let decoded = rs.decode(&corrupted, None).unwrap();
        assert_eq!(decoded.message, HELLO, "error at {}", position);
        assert_eq!(decoded.errors_found, 1);

        let mut erased = encoded.clone();
        erased[position] = 0xAB;
        let decoded = rs.decode(&erased, Some(&[position][..])).unwrap();
        assert_eq!(decoded.message, HELLO, "erasure at {}", position);
    }
}

#[test]
fn test_full_length_codeword() {
    let rs = ReedSolomon::new(8, 10).unwrap();
    let data: Vec<u8> = (0..245).map(|i| (i * 7) as u8).collect();
    let mut encoded = rs.encode(&data).unwrap();
    assert_eq!(encoded.len(), 255);

    encoded[0] ^= 0xFF;
    encoded[254] ^= 0xFF;
    encoded[128] ^= 0x10;
    let decoded = rs.decode(&encoded, None).unwrap();
    assert_eq!(decoded.message, data);
}

// ============================================================================
// Detection and validation
// ============================================================================

#[test]
fn test_single_flip_is_detected_everywhere() {
    let rs = ReedSolomon::new(8, 1).unwrap();
    let encoded = rs.encode(HELLO).unwrap();
    assert!(!rs.is_corrupted(&encoded));

    for position in 0..encoded.len() {
        let mut corrupted = encoded.clone();
        corrupted[position] ^= 0x80;
        assert!(rs.is_corrupted(&corrupted), "flip at {}", position);
    }
}

#[test]
fn test_error_categories() {
    let rs = ReedSolomon::new(8, 4).unwrap();

    assert_eq!(
        ReedSolomon::new(8, 0).unwrap_err().kind(),
        ErrorKind::Configuration
    );
    assert_eq!(
        ReedSolomon::new(12, 4).unwrap_err().kind(),
        ErrorKind::Configuration
    );
    assert_eq!(rs.encode(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
    assert_eq!(rs.decode(&[], None).unwrap_err().kind(), ErrorKind::InvalidInput);

    let encoded = rs.encode(HELLO).unwrap();
    let err = rs.decode(&encoded, Some(&[0, 1, 2, 3, 4][..])).unwrap_err();
    assert_eq!(
        err,
        RsError::TooManyErasures {
            erasures: 5,
            nsym: 4
        }
    );
}

#[test]
fn test_long_message_still_encodes() {
    let rs = ReedSolomon::new(4, 4).unwrap();
    let message = vec![5u8; 20];
    let encoded = rs.encode(&message).unwrap();
    assert_eq!(encoded.len(), 24);
    assert!(matches!(
        rs.decode(&encoded, None),
        Err(RsError::CodewordTooLong { len: 24, max: 15 })
    ));
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn test_codecs_share_one_field() {
    let field = Arc::new(GaloisField::new(8).unwrap());
    let light = ReedSolomon::with_field(Arc::clone(&field), 2).unwrap();
    let heavy = ReedSolomon::with_field(Arc::clone(&field), 32).unwrap();
    assert_eq!(Arc::strong_count(&field), 3);

    let a = light.encode(HELLO).unwrap();
    let b = heavy.encode(HELLO).unwrap();
    assert_eq!(&a[..12], &b[..12]);
    assert_eq!(b.len(), 44);
}

#[test]
fn test_concurrent_decoding() {
    let rs = ReedSolomon::new(8, 6).unwrap();
    let encoded = rs.encode(HELLO).unwrap();

    std::thread::scope(|scope| {
        for t in 0..4usize {
            let rs = &rs;
            let mut corrupted = encoded.clone();
            scope.spawn(move || {
                corrupted[t] ^= 0x11;
                corrupted[t + 8] ^= 0x22;
                let decoded = rs.decode(&corrupted, None).unwrap();
                assert_eq!(decoded.message, HELLO);
            });
        }
    });
}
