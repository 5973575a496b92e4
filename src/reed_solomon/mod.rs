//! Reed-Solomon Error Correction Module
//!
//! Systematic Reed-Solomon codes over GF(2^m), 1 <= m <= 8, with correction of
//! unknown-position errors and known-position erasures.
//!
//! - [`galois`]: field arithmetic backed by log/antilog tables
//! - [`polynomial`]: polynomials over a field, highest power first
//! - [`codec`]: the [`ReedSolomon`] encoder/decoder

pub mod codec;
mod decoder;
pub mod error;
pub mod galois;
pub mod polynomial;

pub use codec::{Decoded, ReedSolomon};
pub use error::{ErrorKind, RsError, RsResult};
pub use galois::{default_primitive_polynomial, GaloisField, Word};
pub use polynomial::{ChienSearch, Polynomial};
