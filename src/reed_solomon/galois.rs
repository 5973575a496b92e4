//! Galois Field GF(2^m) arithmetic for Reed-Solomon operations
//!
//! ## Primitive Polynomials
//!
//! Every supported exponent has a fixed primitive polynomial used to reduce
//! products back into the field:
//!
//! - **GF(2^8)**: 0x11D (x⁸ + x⁴ + x³ + x² + 1) - the byte-oriented default
//! - **GF(2^1) .. GF(2^7)**: the lowest-weight primitive polynomial of each degree
//!
//! ## Implementation Notes
//!
//! Multiplication and division go through precomputed log/antilog tables. The
//! exponential table is stored twice over so the sum of two logarithms can be
//! used as an index directly, without a modulo on the hot path.
//!
//! Zero has no discrete logarithm. `log[0]` holds a sentinel and every
//! operation that consults the log table checks for zero first.
//!
//! Arithmetic takes its operands unchecked. Passing a [`Word`] that is not an
//! element of the field (`x >= 2^m`) panics; use [`GaloisField::contains`] to
//! validate untrusted symbols first.

use super::error::{RsError, RsResult};

/// One symbol of a codeword: an element of GF(2^m), m <= 8
pub type Word = u8;

/// Smallest supported field exponent
pub const MIN_EXPONENT: u32 = 1;

/// Largest supported field exponent (symbols are stored in a [`Word`])
pub const MAX_EXPONENT: u32 = 8;

/// GF(2^8) primitive polynomial: 0x11D (x⁸ + x⁴ + x³ + x² + 1)
pub const GF256_PRIMITIVE: u32 = 0x11D;

/// Default primitive polynomial for each exponent, indexed by `exponent - 1`
const PRIMITIVE_POLYNOMIALS: [u32; 8] = [0x3, 0x7, 0xB, 0x13, 0x25, 0x43, 0x89, GF256_PRIMITIVE];

/// Default primitive polynomial for a field exponent
pub fn default_primitive_polynomial(exponent: u32) -> RsResult<u32> {
    if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
        return Err(RsError::InvalidExponent(exponent));
    }
    Ok(PRIMITIVE_POLYNOMIALS[exponent as usize - 1])
}

/// Galois field GF(2^m) with precomputed log/antilog tables
///
/// Immutable once built. Share it between codecs with an `Arc`.
#[derive(Clone)]
pub struct GaloisField {
    exponent: u32,
    cardinality: usize,
    primitive: u32,
    exp_table: Vec<Word>, // 2x size to avoid modulo in calculations
    log_table: Vec<Word>,
}

impl GaloisField {
    /// Create GF(2^exponent) using its default primitive polynomial
    pub fn new(exponent: u32) -> RsResult<Self> {
        let primitive = default_primitive_polynomial(exponent)?;
        Self::with_primitive_polynomial(exponent, primitive)
    }

    /// Create GF(2^exponent) reduced by a caller-chosen primitive polynomial
    pub fn with_primitive_polynomial(exponent: u32, primitive: u32) -> RsResult<Self> {
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(RsError::InvalidExponent(exponent));
        }

        let cardinality = 1usize << exponent;
        let not_primitive = RsError::NotPrimitive {
            exponent,
            polynomial: primitive,
        };

        // The reduction only works for a polynomial of degree exactly m
        if (primitive as usize) < cardinality || (primitive as usize) >= cardinality * 2 {
            return Err(not_primitive);
        }

        let limit = cardinality - 1;
        let mut exp_table = vec![0; limit * 2];
        let mut log_table = vec![0; cardinality];
        let mut seen = vec![false; cardinality];

        exp_table[0] = 1;
        log_table[0] = 0;
        log_table[1] = 0;
        seen[1] = true;

        let mut x = 1usize;
        for i in 1..limit {
            x <<= 1;
            if x >= cardinality {
                x ^= primitive as usize;
            }

            // A primitive element must walk every nonzero element exactly once
            if x == 0 || x >= cardinality || seen[x] {
                return Err(not_primitive);
            }
            seen[x] = true;

            exp_table[i] = x as Word;
            log_table[x] = i as Word;
        }

        // Duplicate the table for easier calculation
        for i in limit..limit * 2 {
            exp_table[i] = exp_table[i - limit];
        }

        Ok(Self {
            exponent,
            cardinality,
            primitive,
            exp_table,
            log_table,
        })
    }

    /// Field exponent m of GF(2^m)
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Number of field elements, 2^m
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Primitive polynomial used for reduction
    pub fn primitive_polynomial(&self) -> u32 {
        self.primitive
    }

    /// Exponential (antilog) table, 2·(q-1) entries
    pub fn exp_table(&self) -> &[Word] {
        &self.exp_table
    }

    /// Logarithm table, q entries; entry 0 is a sentinel
    pub fn log_table(&self) -> &[Word] {
        &self.log_table
    }

    /// Longest codeword whose positions map to distinct field elements
    pub fn max_codeword_len(&self) -> usize {
        self.cardinality - 1
    }

    /// True if `word` is an element of this field
    #[inline]
    pub fn contains(&self, word: Word) -> bool {
        (word as usize) < self.cardinality
    }

    /// True if both fields use the same tables
    pub fn same_field(&self, other: &GaloisField) -> bool {
        std::ptr::eq(self, other)
            || (self.exponent == other.exponent && self.primitive == other.primitive)
    }

    /// α^power for the primitive element α = 2
    #[inline]
    pub fn alpha_pow(&self, power: usize) -> Word {
        self.exp_table[power % (self.cardinality - 1)]
    }

    #[inline]
    fn check_element(&self, x: Word) {
        debug_assert!(
            self.contains(x),
            "{} is not an element of GF({})",
            x,
            self.cardinality
        );
    }

    /// Discrete logarithm of a nonzero element
    ///
    /// # Panics
    ///
    /// Panics if `x` is not an element of the field.
    #[inline]
    pub fn log(&self, x: Word) -> RsResult<usize> {
        self.check_element(x);
        if x == 0 {
            return Err(RsError::ZeroLogarithm);
        }
        Ok(self.log_table[x as usize] as usize)
    }

    /// Add two elements - this is just XOR
    #[inline]
    pub fn add(&self, x: Word, y: Word) -> Word {
        x ^ y
    }

    /// Subtract two elements - same as addition (XOR)
    #[inline]
    pub fn sub(&self, x: Word, y: Word) -> Word {
        x ^ y
    }

    /// Multiply two elements
    ///
    /// # Panics
    ///
    /// Panics if either operand is not an element of the field.
    #[inline]
    pub fn mul(&self, x: Word, y: Word) -> Word {
        self.check_element(x);
        self.check_element(y);
        if x == 0 || y == 0 {
            return 0;
        }

        let index = self.log_table[x as usize] as usize + self.log_table[y as usize] as usize;
        self.exp_table[index]
    }

    /// Divide two elements
    ///
    /// # Panics
    ///
    /// Panics if either operand is not an element of the field.
    #[inline]
    pub fn div(&self, x: Word, y: Word) -> RsResult<Word> {
        self.check_element(x);
        self.check_element(y);
        if y == 0 {
            return Err(RsError::DivisionByZero);
        }
        if x == 0 {
            return Ok(0);
        }

        // Offset by q-1 keeps the index non-negative in the doubled table
        let index = self.log_table[x as usize] as usize + (self.cardinality - 1)
            - self.log_table[y as usize] as usize;
        Ok(self.exp_table[index])
    }

    /// Raise an element to a power
    ///
    /// # Panics
    ///
    /// Panics if `x` is not an element of the field.
    #[inline]
    pub fn pow(&self, x: Word, power: usize) -> Word {
        self.check_element(x);
        if x == 0 {
            return if power == 0 { 1 } else { 0 };
        }

        let index = (self.log_table[x as usize] as usize * power) % (self.cardinality - 1);
        self.exp_table[index]
    }

    /// Multiplicative inverse of a nonzero element
    ///
    /// # Panics
    ///
    /// Panics if `x` is not an element of the field.
    #[inline]
    pub fn inverse(&self, x: Word) -> RsResult<Word> {
        self.check_element(x);
        if x == 0 {
            return Err(RsError::DivisionByZero);
        }

        let index = self.cardinality - 1 - self.log_table[x as usize] as usize;
        Ok(self.exp_table[index])
    }
}

impl std::fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaloisField")
            .field("exponent", &self.exponent)
            .field("cardinality", &self.cardinality)
            .field("primitive", &format_args!("{:#x}", self.primitive))
            .finish()
    }
}
