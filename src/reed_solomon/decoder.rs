//! Decode pipeline for [`ReedSolomon`]
//!
//! Syndromes are stored like every other polynomial here: highest power first.
//! `calculate_syndromes` returns `[S(nsym-1), ..., S(1), S(0), 0]`, with one
//! trailing zero of padding. The error locator recurrence reads them through
//! an ascending view.

use super::codec::ReedSolomon;
use super::error::{RsError, RsResult};
use super::galois::{GaloisField, Word};
use super::polynomial::Polynomial;
use log::trace;

impl ReedSolomon {
    /// Evaluate `message` at α^0 .. α^(nsym-1), highest power first, zero padded
    pub fn calculate_syndromes<'f>(&self, message: &Polynomial<'f>) -> Polynomial<'f> {
        let field = message.field();
        let nsym = self.nsym();
        let mut syndromes = vec![0; nsym + 1];

        for i in 0..nsym {
            syndromes[nsym - i - 1] = message.evaluate(field.alpha_pow(i));
        }

        Polynomial::new(field, syndromes)
    }

    /// True if every syndrome is zero, i.e. the word is a valid codeword
    pub fn check_syndromes(syndromes: &Polynomial<'_>) -> bool {
        syndromes.is_zero()
    }

    /// Fold known erasure positions out of the syndromes
    ///
    /// `n` is the codeword length. The padding coefficient is dropped, so the
    /// result has `nsym` coefficients of which the first `nsym - erasures`
    /// (in ascending order) are meaningful.
    pub fn calculate_forney_syndromes<'f>(
        &self,
        syndromes: &Polynomial<'f>,
        erasure_positions: &[usize],
        n: usize,
    ) -> RsResult<Polynomial<'f>> {
        let field = syndromes.field();
        let mut forney_syndromes = syndromes.clone();
        forney_syndromes.trim_end(1)?;

        let len = forney_syndromes.len();
        for &position in erasure_positions {
            if position >= n {
                return Err(RsError::ErasureOutOfRange { position, len: n });
            }

            let x = field.alpha_pow(n - position - 1);
            for j in (0..len.saturating_sub(1)).rev() {
                forney_syndromes[j + 1] = field.mul(forney_syndromes[j + 1], x) ^ forney_syndromes[j];
            }
        }

        trace!("Forney syndromes: {:?}", forney_syndromes);
        Ok(forney_syndromes)
    }

    /// Product of `(α^c·x + 1)` over coefficient degrees `c`
    ///
    /// The roots are α^(-c), one per erased or erroneous coefficient.
    pub fn calculate_erasure_locator_polynomial<'f>(
        &self,
        field: &'f GaloisField,
        coefficient_positions: &[usize],
    ) -> Polynomial<'f> {
        let mut erasure_locator = Polynomial::one(field);
        let mut factor = Polynomial::new(field, vec![0, 1]);

        for &c in coefficient_positions {
            factor[0] = field.alpha_pow(c);
            erasure_locator.mul_assign(&factor);
        }

        erasure_locator
    }

    /// Error evaluator Ω(x): `syndromes · locator` keeping the low `n` coefficients
    pub fn calculate_error_evaluator_polynomial<'f>(
        &self,
        syndromes: &Polynomial<'f>,
        locator: &Polynomial<'_>,
        n: usize,
    ) -> Polynomial<'f> {
        let product = syndromes.mul(locator);
        let excess = product.len().saturating_sub(n);
        Polynomial::from_slice(syndromes.field(), &product.coefficients()[excess..])
    }

    /// Forney algorithm: compute and apply magnitudes at `positions`
    ///
    /// `positions` are indices into `message` (erasures and located errors).
    /// `syndromes` must be the padded syndromes of `message`.
    pub fn correct_erasures<'f>(
        &self,
        message: &Polynomial<'f>,
        syndromes: &Polynomial<'_>,
        positions: &[usize],
    ) -> RsResult<Polynomial<'f>> {
        let field = message.field();
        let n = message.len();

        // Convert position to coefficient degree
        let coefficient_positions = positions
            .iter()
            .map(|&p| {
                if p < n {
                    Ok(n - p - 1)
                } else {
                    Err(RsError::ErasureOutOfRange { position: p, len: n })
                }
            })
            .collect::<RsResult<Vec<usize>>>()?;

        let locator = self.calculate_erasure_locator_polynomial(field, &coefficient_positions);
        let evaluator = self.calculate_error_evaluator_polynomial(syndromes, &locator, locator.len());

        let locations: Vec<Word> = coefficient_positions
            .iter()
            .map(|&c| field.alpha_pow(c))
            .collect();

        let mut magnitudes = Polynomial::zeroed(field, n);
        for (i, &c) in coefficient_positions.iter().enumerate() {
            // Inverse of the error location
            let xi_inverse = field.alpha_pow(field.cardinality() - 1 - c);

            // Formal derivative of the locator at the root, up to a factor
            let mut locator_prime: Word = 1;
            for (j, &xj) in locations.iter().enumerate() {
                if j != i {
                    locator_prime = field.mul(locator_prime, 1 ^ field.mul(xi_inverse, xj));
                }
            }

            if locator_prime == 0 {
                return Err(RsError::ErrorMagnitude(positions[i]));
            }

            let y = field.mul(locations[i], evaluator.evaluate(xi_inverse));
            magnitudes[positions[i]] = field.div(y, locator_prime)?;
        }

        Ok(message.add(&magnitudes))
    }

    /// Berlekamp-Massey error locator from `syndromes`
    ///
    /// With `erasure_locator == None`, `syndromes` are Forney syndromes and the
    /// result locates only the unknown errors. With an erasure locator, pass the
    /// padded syndromes from [`ReedSolomon::calculate_syndromes`]; the result
    /// then locates erasures and errors together.
    ///
    /// `n` is the number of check symbols. The recurrence runs `n - erasure_count`
    /// steps, one per usable syndrome.
    pub fn calculate_error_locator_polynomial<'f>(
        &self,
        syndromes: &Polynomial<'f>,
        n: usize,
        erasure_locator: Option<&Polynomial<'_>>,
        erasure_count: usize,
    ) -> RsResult<Polynomial<'f>> {
        let field = syndromes.field();
        let len = syndromes.len();

        let shift = len
            .checked_sub(n)
            .ok_or(RsError::SyndromeLength { len, nsym: n })?;
        let steps = n.checked_sub(erasure_count).ok_or(RsError::TooManyErasures {
            erasures: erasure_count,
            nsym: n,
        })?;

        // Syndromes in ascending order
        let synd = |k: usize| syndromes[len - 1 - k];

        let (mut error_locations, mut old_locations) = match erasure_locator {
            Some(locator) => {
                let locator = Polynomial::from_slice(field, locator.coefficients());
                (locator.clone(), locator)
            }
            None => (Polynomial::one(field), Polynomial::one(field)),
        };
        let offset = if erasure_locator.is_some() {
            erasure_count + shift
        } else {
            shift
        };

        for i in 0..steps {
            let k = offset + i;

            let mut delta = synd(k);
            for j in 1..error_locations.len() {
                let x = error_locations[error_locations.len() - j - 1];
                delta ^= field.mul(x, synd(k - j));
            }

            old_locations.enlarge(1, 0)?;

            if delta != 0 {
                if old_locations.len() > error_locations.len() {
                    let new_locations = old_locations.scale(delta);
                    old_locations = error_locations.scale(field.inverse(delta)?);
                    error_locations = new_locations;
                }

                error_locations.add_assign(&old_locations.scale(delta));
            }
        }

        error_locations.trim_leading_zeros();

        let degree = error_locations.len() - 1;
        let errors = if erasure_locator.is_some() {
            degree.saturating_sub(erasure_count)
        } else {
            degree
        };

        if errors * 2 + erasure_count > n {
            return Err(RsError::TooManyErrors {
                errors,
                erasures: erasure_count,
                nsym: n,
            });
        }

        Ok(error_locations)
    }

    /// Positions (indices into the codeword) of the roots of `error_locator`
    pub fn find_errors(
        &self,
        error_locator: &Polynomial<'_>,
        message_len: usize,
    ) -> RsResult<Vec<usize>> {
        let field = error_locator.field();
        let expected = error_locator.len().saturating_sub(1);

        let roots = match error_locator.len() {
            0 | 1 => Vec::new(),
            2 => {
                // Single error: solve a·x + b directly
                let mismatch = RsError::RootCountMismatch { found: 0, expected };
                let ratio = field
                    .div(error_locator[0], error_locator[1])
                    .map_err(|_| mismatch.clone())?;
                vec![field.log(ratio).map_err(|_| mismatch)?]
            }
            _ => error_locator.reversed().chien_search(message_len),
        };

        if roots.len() != expected {
            return Err(RsError::RootCountMismatch {
                found: roots.len(),
                expected,
            });
        }

        roots
            .into_iter()
            .map(|index| {
                if index >= message_len {
                    Err(RsError::RootOutOfRange {
                        index,
                        len: message_len,
                    })
                } else {
                    Ok(message_len - index - 1)
                }
            })
            .collect()
    }
}
