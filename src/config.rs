//! Configuration for encode/decode operations

use crate::reed_solomon::galois::{MAX_EXPONENT, MIN_EXPONENT};
use crate::reed_solomon::{RsError, RsResult};

/// Codec parameters and execution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Field exponent m, symbols are elements of GF(2^m)
    pub exponent: u32,
    /// Number of check symbols per codeword
    pub nsym: usize,
    /// Data symbols per block (0 = largest block the field allows)
    pub block_size: usize,
    /// Number of threads for block processing (0 = auto-detect)
    pub threads: usize,
    /// Whether to process blocks in parallel
    pub parallel: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            exponent: 8,
            nsym: 10,
            block_size: 0, // Fill the codeword
            threads: 0,    // Auto-detect CPU cores
            parallel: true,
        }
    }
}

impl CodecConfig {
    pub fn new(exponent: u32, nsym: usize) -> Self {
        Self {
            exponent,
            nsym,
            ..Self::default()
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_threads(mut self, threads: usize, parallel: bool) -> Self {
        self.threads = threads;
        self.parallel = parallel;
        self
    }

    /// Build from parsed command-line arguments, falling back to defaults
    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let defaults = Self::default();

        let exponent = matches
            .get_one::<u32>("exponent")
            .copied()
            .unwrap_or(defaults.exponent);
        let nsym = matches
            .get_one::<usize>("nsym")
            .copied()
            .unwrap_or(defaults.nsym);
        let block_size = matches
            .get_one::<usize>("block-size")
            .copied()
            .unwrap_or(defaults.block_size);
        let threads = matches
            .get_one::<usize>("threads")
            .copied()
            .unwrap_or(defaults.threads);

        let parallel = !matches.get_flag("no-parallel");

        Self::new(exponent, nsym)
            .with_block_size(block_size)
            .with_threads(threads, parallel)
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1,
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            (true, n) => n,
        }
    }

    /// Codeword length limit of the configured field, q - 1
    pub fn max_codeword_len(&self) -> RsResult<usize> {
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&self.exponent) {
            return Err(RsError::InvalidExponent(self.exponent));
        }
        Ok((1usize << self.exponent) - 1)
    }

    /// Data symbols per block after resolving `block_size = 0`
    pub fn data_block_len(&self) -> RsResult<usize> {
        let max_codeword = self.max_codeword_len()?;

        if self.nsym == 0 {
            return Err(RsError::NoCheckSymbols);
        }
        if self.nsym >= max_codeword {
            return Err(RsError::TooManyCheckSymbols {
                nsym: self.nsym,
                max: max_codeword,
            });
        }

        let max = max_codeword - self.nsym;
        match self.block_size {
            0 => Ok(max),
            size if size <= max => Ok(size),
            size => Err(RsError::InvalidBlockSize { size, max }),
        }
    }

    /// Check that a codec can be built from this configuration
    pub fn validate(&self) -> RsResult<()> {
        self.data_block_len().map(|_| ())
    }
}
