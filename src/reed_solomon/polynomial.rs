//! Polynomial arithmetic over GF(2^m)
//!
//! Coefficients are stored most significant first: index 0 holds the
//! highest-degree term. A codeword read left to right is therefore a polynomial
//! whose first symbol is its leading coefficient.
//!
//! A [`Polynomial`] borrows the [`GaloisField`] it is defined over, so it can
//! never outlive the field tables. Operations come in two flavours: pure ones
//! (`add`, `scale`, `mul`, `div_rem`, `reversed`) that return a new value, and
//! in-place ones (`add_assign`, `scale_in_place`, `mul_assign`, `divide`, ...)
//! for the decoder's scratch polynomials.

use super::error::{RsError, RsResult};
use super::galois::{GaloisField, Word};
use std::ops::{Index, IndexMut, Mul};

/// Polynomial with coefficients in GF(2^m), highest degree first
#[derive(Clone)]
pub struct Polynomial<'f> {
    field: &'f GaloisField,
    coefficients: Vec<Word>,
}

impl<'f> Polynomial<'f> {
    /// Polynomial taking ownership of existing coefficients
    pub fn new(field: &'f GaloisField, coefficients: Vec<Word>) -> Self {
        Self {
            field,
            coefficients,
        }
    }

    /// Polynomial copied from a coefficient slice
    pub fn from_slice(field: &'f GaloisField, coefficients: &[Word]) -> Self {
        Self::new(field, coefficients.to_vec())
    }

    /// Zero-initialized polynomial with `len` coefficients
    pub fn zeroed(field: &'f GaloisField, len: usize) -> Self {
        Self::new(field, vec![0; len])
    }

    /// The constant polynomial 1
    pub fn one(field: &'f GaloisField) -> Self {
        Self::new(field, vec![1])
    }

    /// Field the coefficients belong to
    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Formal degree (`len - 1`), `None` for an empty polynomial
    pub fn degree(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    pub fn coefficients(&self) -> &[Word] {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut [Word] {
        &mut self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<Word> {
        self.coefficients
    }

    /// True if every coefficient is zero
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0)
    }

    #[inline]
    fn check_same_field(&self, other: &Polynomial<'_>) {
        debug_assert!(
            self.field.same_field(other.field),
            "polynomial operands are defined over different fields"
        );
    }

    /// Sum of two polynomials, aligned at their highest degree
    pub fn add(&self, other: &Polynomial<'_>) -> Polynomial<'f> {
        self.check_same_field(other);

        let len = self.len().max(other.len());
        let mut coefficients = vec![0; len];

        coefficients[len - self.len()..].copy_from_slice(&self.coefficients);
        for (dst, &src) in coefficients[len - other.len()..]
            .iter_mut()
            .zip(&other.coefficients)
        {
            *dst ^= src;
        }

        Polynomial::new(self.field, coefficients)
    }

    /// In-place variant of [`Polynomial::add`]
    pub fn add_assign(&mut self, other: &Polynomial<'_>) {
        *self = self.add(other);
    }

    /// Every coefficient multiplied by `scalar`
    pub fn scale(&self, scalar: Word) -> Polynomial<'f> {
        let mut result = self.clone();
        result.scale_in_place(scalar);
        result
    }

    /// In-place variant of [`Polynomial::scale`]
    pub fn scale_in_place(&mut self, scalar: Word) {
        for c in &mut self.coefficients {
            *c = self.field.mul(*c, scalar);
        }
    }

    /// Product of two polynomials (schoolbook convolution)
    pub fn mul(&self, other: &Polynomial<'_>) -> Polynomial<'f> {
        self.check_same_field(other);

        if self.is_empty() || other.is_empty() {
            return Polynomial::new(self.field, Vec::new());
        }

        let mut coefficients = vec![0; self.len() + other.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] ^= self.field.mul(a, b);
            }
        }

        Polynomial::new(self.field, coefficients)
    }

    /// In-place variant of [`Polynomial::mul`]
    pub fn mul_assign(&mut self, other: &Polynomial<'_>) {
        *self = self.mul(other);
    }

    /// Extended synthetic division by `divisor`
    ///
    /// Returns `(quotient, remainder)` and leaves the receiver holding the full
    /// scratch buffer: the quotient followed by the remainder. The divisor does
    /// not have to be monic.
    pub fn divide(
        &mut self,
        divisor: &Polynomial<'_>,
    ) -> RsResult<(Polynomial<'f>, Polynomial<'f>)> {
        self.check_same_field(divisor);

        if divisor.is_empty() {
            return Err(RsError::DivisionByZero);
        }
        if divisor.len() > self.len() {
            return Err(RsError::DivisorTooLong {
                divisor: divisor.len(),
                dividend: self.len(),
            });
        }

        let normalizer = divisor.coefficients[0];
        if normalizer == 0 {
            return Err(RsError::DivisionByZero);
        }

        let field = self.field;
        let upper_limit = self.len() - divisor.len() + 1;
        let tmp = &mut self.coefficients;

        for i in 0..upper_limit {
            tmp[i] = field.div(tmp[i], normalizer)?;
            let coefficient = tmp[i];

            // log(0) is undefined
            if coefficient == 0 {
                continue;
            }

            for (j, &d) in divisor.coefficients.iter().enumerate().skip(1) {
                if d != 0 {
                    tmp[i + j] ^= field.mul(d, coefficient);
                }
            }
        }

        let quotient = Polynomial::from_slice(field, &tmp[..upper_limit]);
        let remainder = Polynomial::from_slice(field, &tmp[upper_limit..]);

        Ok((quotient, remainder))
    }

    /// Pure variant of [`Polynomial::divide`]
    pub fn div_rem(&self, divisor: &Polynomial<'_>) -> RsResult<(Polynomial<'f>, Polynomial<'f>)> {
        self.clone().divide(divisor)
    }

    /// Value of the polynomial at `x` (Horner's method)
    ///
    /// # Panics
    ///
    /// Panics if `x` or a coefficient is not an element of the field.
    pub fn evaluate(&self, x: Word) -> Word {
        self.coefficients
            .iter()
            .fold(0, |acc, &c| self.field.mul(acc, x) ^ c)
    }

    /// Lazily search the exponents `0..max` for roots α^i
    ///
    /// The iterator yields every `i` with `P(α^i) == 0`, in increasing order.
    /// Calling this again restarts the search.
    pub fn chien_roots(&self, max: usize) -> ChienSearch<'f> {
        ChienSearch::new(self, max)
    }

    /// Eager variant of [`Polynomial::chien_roots`]
    pub fn chien_search(&self, max: usize) -> Vec<usize> {
        self.chien_roots(max).collect()
    }

    /// Reverse the coefficient order in place
    pub fn reverse(&mut self) {
        self.coefficients.reverse();
    }

    /// Copy with reversed coefficient order
    pub fn reversed(&self) -> Polynomial<'f> {
        let mut result = self.clone();
        result.reverse();
        result
    }

    /// Append `count` coefficients equal to `value` (multiplies by x^count when zero)
    pub fn enlarge(&mut self, count: usize, value: Word) -> RsResult<()> {
        if count == 0 {
            return Err(RsError::InvalidResize {
                len: self.len(),
                amount: count,
            });
        }
        self.coefficients.resize(self.len() + count, value);
        Ok(())
    }

    /// Cut `count` coefficients from the end
    pub fn trim_end(&mut self, count: usize) -> RsResult<()> {
        if count > self.len() {
            return Err(RsError::InvalidResize {
                len: self.len(),
                amount: count,
            });
        }
        self.coefficients.truncate(self.len() - count);
        Ok(())
    }

    /// Cut `count` coefficients from the beginning
    pub fn trim_beginning(&mut self, count: usize) -> RsResult<()> {
        if count > self.len() {
            return Err(RsError::InvalidResize {
                len: self.len(),
                amount: count,
            });
        }
        self.coefficients.drain(..count);
        Ok(())
    }

    /// Drop leading zero coefficients, keeping at least one; returns how many were removed
    pub fn trim_leading_zeros(&mut self) -> usize {
        let zeros = self
            .coefficients
            .iter()
            .take(self.len().saturating_sub(1))
            .take_while(|&&c| c == 0)
            .count();
        self.coefficients.drain(..zeros);
        zeros
    }
}

impl Index<usize> for Polynomial<'_> {
    type Output = Word;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coefficients[index]
    }
}

impl IndexMut<usize> for Polynomial<'_> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.coefficients[index]
    }
}

impl<'f> Mul<Word> for &Polynomial<'f> {
    type Output = Polynomial<'f>;

    fn mul(self, scalar: Word) -> Self::Output {
        self.scale(scalar)
    }
}

impl PartialEq for Polynomial<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.field.same_field(other.field) && self.coefficients == other.coefficients
    }
}

impl Eq for Polynomial<'_> {}

impl std::fmt::Debug for Polynomial<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Polynomial[")?;
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:#04x}", c)?;
        }
        write!(f, "]")
    }
}

/// Incremental root search over α^0, α^1, ..., α^(max-1)
///
/// Instead of re-running Horner for each candidate, every coefficient is kept
/// multiplied by the matching power of α; the XOR of the running terms is the
/// polynomial's value at the current candidate.
pub struct ChienSearch<'f> {
    field: &'f GaloisField,
    terms: Vec<Word>,
    multipliers: Vec<Word>,
    step: usize,
    max: usize,
}

impl<'f> ChienSearch<'f> {
    fn new(polynomial: &Polynomial<'f>, max: usize) -> Self {
        let field = polynomial.field;
        let len = polynomial.len();
        let multipliers = (0..len).map(|j| field.alpha_pow(len - j - 1)).collect();

        Self {
            field,
            terms: polynomial.coefficients.clone(),
            multipliers,
            step: 0,
            max,
        }
    }
}

impl Iterator for ChienSearch<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.step < self.max {
            let mut sum = 0;
            for (term, &multiplier) in self.terms.iter_mut().zip(&self.multipliers) {
                sum ^= *term;
                *term = self.field.mul(*term, multiplier);
            }

            let index = self.step;
            self.step += 1;

            if sum == 0 {
                return Some(index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.max - self.step))
    }
}
