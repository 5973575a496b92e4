//! Reed-Solomon encoder/decoder over GF(2^m)
//!
//! ## Overview
//!
//! Systematic encoding: the message is treated as a polynomial, shifted up by
//! `nsym` positions and divided by the generator polynomial
//! `g(x) = (x - α^0)(x - α^1)...(x - α^(nsym-1))`. The remainder becomes the
//! check symbols appended to the unchanged message.
//!
//! Decoding evaluates the received word at the generator roots (syndromes). If
//! any syndrome is nonzero, known erasures are folded out (Forney syndromes),
//! the remaining errors are located with a Berlekamp-Massey recurrence plus a
//! Chien search, and all magnitudes are computed with the Forney algorithm.
//! The decode pipeline itself lives in `decoder.rs`.
//!
//! ## Capacity
//!
//! With `nsym` check symbols the code corrects any combination of `errors`
//! unknown-position errors and `erasures` known-position erasures satisfying
//! `2·errors + erasures <= nsym`.
//!
//! ## Positions
//!
//! Index 0 of a codeword is its first symbol and the highest-degree
//! coefficient of the codeword polynomial. Position `p` of an `n`-symbol
//! codeword corresponds to coefficient degree `n - 1 - p`.

use super::error::{RsError, RsResult};
use super::galois::{GaloisField, Word};
use super::polynomial::Polynomial;
use crate::config::CodecConfig;
use log::{debug, warn};
use std::sync::Arc;

/// Result of a successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Corrected message without check symbols
    pub message: Vec<Word>,
    /// Errors located by the decoder (known erasures not included)
    pub errors_found: usize,
    /// Erasure positions supplied by the caller
    pub erasures: usize,
}

impl Decoded {
    /// Total number of symbols that were located or supplied as erasures
    pub fn corrections(&self) -> usize {
        self.errors_found + self.erasures
    }
}

/// Reed-Solomon codec with a fixed number of check symbols
///
/// Owns a shared reference to its field and the generator polynomial built at
/// construction. Encode and decode never mutate the codec, so one instance can
/// serve many threads.
#[derive(Clone)]
pub struct ReedSolomon {
    field: Arc<GaloisField>,
    nsym: usize,
    generator: Vec<Word>,
}

impl ReedSolomon {
    /// Codec over GF(2^exponent) with `nsym` check symbols
    pub fn new(exponent: u32, nsym: usize) -> RsResult<Self> {
        let field = GaloisField::new(exponent)?;
        Self::with_field(Arc::new(field), nsym)
    }

    /// Codec sharing an existing field
    pub fn with_field(field: Arc<GaloisField>, nsym: usize) -> RsResult<Self> {
        if nsym == 0 {
            return Err(RsError::NoCheckSymbols);
        }

        let max = field.max_codeword_len();
        if nsym >= max {
            return Err(RsError::TooManyCheckSymbols { nsym, max });
        }

        let generator = create_generator_polynomial(&field, nsym).into_coefficients();
        debug!(
            "Created GF({}) codec with {} check symbols",
            field.cardinality(),
            nsym
        );

        Ok(Self {
            field,
            nsym,
            generator,
        })
    }

    /// Codec from a validated configuration
    pub fn from_config(config: &CodecConfig) -> RsResult<Self> {
        config.validate()?;
        Self::new(config.exponent, config.nsym)
    }

    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    /// Shared handle to the field, for building more codecs over it
    pub fn shared_field(&self) -> Arc<GaloisField> {
        Arc::clone(&self.field)
    }

    /// Number of check symbols appended by [`ReedSolomon::encode`]
    pub fn nsym(&self) -> usize {
        self.nsym
    }

    /// Longest message whose codeword can still be decoded
    pub fn max_message_len(&self) -> usize {
        self.field.max_codeword_len() - self.nsym
    }

    /// The generator polynomial, `nsym + 1` coefficients
    pub fn generator_polynomial(&self) -> Polynomial<'_> {
        Polynomial::from_slice(&self.field, &self.generator)
    }

    fn validate_symbols(&self, data: &[Word]) -> RsResult<()> {
        match data.iter().position(|&w| !self.field.contains(w)) {
            Some(index) => Err(RsError::SymbolOutOfRange {
                index,
                value: data[index],
                cardinality: self.field.cardinality(),
            }),
            None => Ok(()),
        }
    }

    /// Append `nsym` check symbols to `message`
    pub fn encode(&self, message: &[Word]) -> RsResult<Vec<Word>> {
        if message.is_empty() {
            return Err(RsError::EmptyMessage);
        }
        self.validate_symbols(message)?;

        if message.len() > self.max_message_len() {
            warn!(
                "Encoding {} symbols; codewords longer than {} cannot be decoded",
                message.len(),
                self.field.max_codeword_len()
            );
        }

        let generator = self.generator_polynomial();
        let mut message_polynomial = Polynomial::from_slice(&self.field, message);
        message_polynomial.enlarge(self.nsym, 0)?;
        let (_, remainder) = message_polynomial.divide(&generator)?;

        let mut result = Vec::with_capacity(message.len() + self.nsym);
        result.extend_from_slice(message);
        result.extend_from_slice(remainder.coefficients());

        Ok(result)
    }

    /// True if any syndrome of `data` is nonzero or a symbol is outside the field
    pub fn is_corrupted(&self, data: &[Word]) -> bool {
        if self.validate_symbols(data).is_err() {
            return true;
        }
        let message = Polynomial::from_slice(&self.field, data);
        !Self::check_syndromes(&self.calculate_syndromes(&message))
    }

    /// Correct `data` and strip its check symbols
    ///
    /// `erasure_positions` are indices into `data` known to be wrong. Errors at
    /// unknown positions are located by the decoder; their count is reported in
    /// [`Decoded::errors_found`].
    pub fn decode(&self, data: &[Word], erasure_positions: Option<&[usize]>) -> RsResult<Decoded> {
        if data.is_empty() {
            return Err(RsError::EmptyData);
        }

        let len = data.len();
        if len <= self.nsym {
            return Err(RsError::CodewordTooShort {
                len,
                nsym: self.nsym,
            });
        }

        let max = self.field.max_codeword_len();
        if len > max {
            return Err(RsError::CodewordTooLong { len, max });
        }
        self.validate_symbols(data)?;

        let erasures = erasure_positions.unwrap_or(&[]);
        if erasures.len() > self.nsym {
            return Err(RsError::TooManyErasures {
                erasures: erasures.len(),
                nsym: self.nsym,
            });
        }

        let mut message = Polynomial::from_slice(&self.field, data);

        // Erased values are unknown; zero them so only their positions matter
        for &position in erasures {
            if position >= len {
                return Err(RsError::ErasureOutOfRange { position, len });
            }
            message[position] = 0;
        }

        let syndromes = self.calculate_syndromes(&message);
        let mut errors_found = 0;

        if !Self::check_syndromes(&syndromes) {
            debug!("Syndromes: {:?}", syndromes);

            let forney_syndromes = self.calculate_forney_syndromes(&syndromes, erasures, len)?;
            let error_locator = self.calculate_error_locator_polynomial(
                &forney_syndromes,
                self.nsym,
                None,
                erasures.len(),
            )?;
            debug!("Error locator: {:?}", error_locator);

            let error_positions = self.find_errors(&error_locator, len)?;
            errors_found = error_positions.len();

            if error_positions.is_empty() && erasures.is_empty() {
                return Err(RsError::UnableToLocateErrors);
            }
            debug!(
                "Located {} errors at {:?}, {} erasures at {:?}",
                errors_found,
                error_positions,
                erasures.len(),
                erasures
            );

            let mut positions = Vec::with_capacity(erasures.len() + error_positions.len());
            positions.extend_from_slice(erasures);
            positions.extend(error_positions);

            message = self.correct_erasures(&message, &syndromes, &positions)?;

            if !Self::check_syndromes(&self.calculate_syndromes(&message)) {
                return Err(RsError::CorrectionFailed);
            }
        }

        let mut coefficients = message.into_coefficients();
        coefficients.truncate(len - self.nsym);

        Ok(Decoded {
            message: coefficients,
            errors_found,
            erasures: erasures.len(),
        })
    }
}

impl std::fmt::Debug for ReedSolomon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReedSolomon")
            .field("field", &self.field)
            .field("nsym", &self.nsym)
            .finish()
    }
}

/// Product of `(x - α^i)` for `i` in `0..nsym`
fn create_generator_polynomial(field: &GaloisField, nsym: usize) -> Polynomial<'_> {
    let mut generator = Polynomial::one(field);
    let mut factor = Polynomial::new(field, vec![1, 0]);

    for i in 0..nsym {
        factor[1] = field.alpha_pow(i);
        generator.mul_assign(&factor);
    }

    generator
}
