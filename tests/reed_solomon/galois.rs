//! Galois Field GF(2^m) Arithmetic Tests
//!
//! Tests for table construction, field operations and the supported
//! exponent range.

use rsecc::reed_solomon::galois::{default_primitive_polynomial, GaloisField, GF256_PRIMITIVE};
use rsecc::reed_solomon::RsError;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_every_supported_exponent_builds() {
    for exponent in 1..=8 {
        let gf = GaloisField::new(exponent).unwrap();
        assert_eq!(gf.exponent(), exponent);
        assert_eq!(gf.cardinality(), 1 << exponent);
        assert_eq!(gf.max_codeword_len(), (1 << exponent) - 1);
        assert_eq!(
            gf.primitive_polynomial(),
            default_primitive_polynomial(exponent).unwrap()
        );
    }
}

#[test]
fn test_unsupported_exponents() {
    assert_eq!(GaloisField::new(0).unwrap_err(), RsError::InvalidExponent(0));
    assert_eq!(GaloisField::new(9).unwrap_err(), RsError::InvalidExponent(9));
    assert_eq!(GaloisField::new(16).unwrap_err(), RsError::InvalidExponent(16));
}

#[test]
fn test_gf256_default_polynomial() {
    let gf = GaloisField::new(8).unwrap();
    assert_eq!(gf.primitive_polynomial(), GF256_PRIMITIVE);
    assert_eq!(gf.primitive_polynomial(), 285);
}

#[test]
fn test_custom_primitive_polynomial() {
    // x^8 + x^6 + x^3 + x^2 + 1 is also primitive
    let gf = GaloisField::with_primitive_polynomial(8, 0x14D).unwrap();
    assert_eq!(gf.primitive_polynomial(), 0x14D);

    let default = GaloisField::new(8).unwrap();
    assert!(!gf.same_field(&default));
    assert_ne!(gf.exp_table(), default.exp_table());
}

#[test]
fn test_rejects_reducible_or_wrong_degree_polynomials() {
    // AES polynomial is irreducible but 2 does not generate the group
    assert!(matches!(
        GaloisField::with_primitive_polynomial(8, 0x11B),
        Err(RsError::NotPrimitive { exponent: 8, .. })
    ));
    // Degree 4 polynomial offered for GF(2^8)
    assert!(GaloisField::with_primitive_polynomial(8, 0x13).is_err());
    // x^4 + x^3 + x^2 + x + 1 divides x^5 - 1, order 5 only
    assert!(GaloisField::with_primitive_polynomial(4, 0x1F).is_err());
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_tables_are_inverse() {
    let gf = GaloisField::new(8).unwrap();
    for x in 1..=255u8 {
        let log = gf.log(x).unwrap();
        assert_eq!(gf.alpha_pow(log), x);
    }
    for i in 0..255 {
        assert_eq!(gf.log(gf.alpha_pow(i)).unwrap(), i);
    }
}

#[test]
fn test_exp_table_is_doubled() {
    let gf = GaloisField::new(5).unwrap();
    let exp = gf.exp_table();
    assert_eq!(exp.len(), 62);
    assert_eq!(&exp[..31], &exp[31..]);
    assert_eq!(gf.log_table().len(), 32);
}

#[test]
fn test_alpha_pow_wraps() {
    let gf = GaloisField::new(8).unwrap();
    assert_eq!(gf.alpha_pow(0), 1);
    assert_eq!(gf.alpha_pow(1), 2);
    assert_eq!(gf.alpha_pow(8), 0x1D);
    assert_eq!(gf.alpha_pow(255), 1);
    assert_eq!(gf.alpha_pow(256 + 3), gf.alpha_pow(4));
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_addition_is_xor() {
    let gf = GaloisField::new(8).unwrap();
    assert_eq!(gf.add(5, 3), 6);
    assert_eq!(gf.sub(5, 3), 6);
    assert_eq!(gf.add(0xAA, 0xAA), 0);
}

#[test]
fn test_known_products() {
    let gf = GaloisField::new(8).unwrap();
    assert_eq!(gf.mul(2, 0x80), 0x1D);
    assert_eq!(gf.mul(3, 7), 9);
    assert_eq!(gf.mul(0, 0x45), 0);
    assert_eq!(gf.mul(0x45, 1), 0x45);
}

#[test]
fn test_division_and_inverse() {
    let gf = GaloisField::new(8).unwrap();
    for x in 1..=255u8 {
        let inv = gf.inverse(x).unwrap();
        assert_eq!(gf.mul(x, inv), 1);
        assert_eq!(gf.div(1, x).unwrap(), inv);
        assert_eq!(gf.div(x, x).unwrap(), 1);
    }
    assert_eq!(gf.div(0, 7).unwrap(), 0);
    assert_eq!(gf.div(7, 0).unwrap_err(), RsError::DivisionByZero);
    assert_eq!(gf.inverse(0).unwrap_err(), RsError::DivisionByZero);
}

#[test]
fn test_power_special_cases() {
    let gf = GaloisField::new(8).unwrap();
    assert_eq!(gf.pow(0, 0), 1);
    assert_eq!(gf.pow(0, 5), 0);
    assert_eq!(gf.pow(7, 0), 1);
    assert_eq!(gf.pow(2, 8), 0x1D);
    // Fermat: x^(q-1) = 1
    assert_eq!(gf.pow(0x53, 255), 1);
}

#[test]
fn test_log_of_zero() {
    let gf = GaloisField::new(8).unwrap();
    assert_eq!(gf.log(0).unwrap_err(), RsError::ZeroLogarithm);
}

#[test]
fn test_small_field_arithmetic() {
    // GF(8) with x^3 + x + 1: α^3 = α + 1
    let gf = GaloisField::new(3).unwrap();
    assert_eq!(gf.alpha_pow(3), 3);
    assert_eq!(gf.mul(4, 2), 3);
    assert_eq!(gf.pow(2, 7), 1);
    assert!(gf.contains(7));
    assert!(!gf.contains(8));
}

#[test]
fn test_field_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GaloisField>();
}
