//! Block codec for buffers of any length
//!
//! ## Overview
//!
//! A single codeword holds at most `q - 1` symbols. [`BlockCodec`] splits
//! longer input into data blocks of `k` symbols, encodes each block into a
//! `k + nsym` codeword and concatenates the codewords. Only the last block may
//! be shorter. Decoding splits on the same boundaries, so the encoded layout
//! needs no header.
//!
//! Blocks are independent and are processed with rayon when parallel
//! processing is enabled. Each codec owns its own thread pool, built once and
//! shared by its clones, so `threads` bounds encode, decode and corruption
//! checks alike.

use crate::chunker::{assemble_chunks, chunk_data};
use crate::config::CodecConfig;
use crate::reed_solomon::{Decoded, ReedSolomon, RsError, RsResult, Word};
use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::Arc;

/// Result of decoding a multi-block buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDecoded {
    /// Reassembled data without check symbols
    pub data: Vec<Word>,
    /// Number of codewords in the input
    pub blocks: usize,
    /// Indices of blocks that needed correction
    pub corrected_blocks: Vec<usize>,
    /// Errors located across all blocks
    pub errors_found: usize,
    /// Erasures supplied across all blocks
    pub erasures: usize,
}

/// Reed-Solomon codec applied block by block
#[derive(Debug, Clone)]
pub struct BlockCodec {
    codec: ReedSolomon,
    block_len: usize,
    threads: usize,
    parallel: bool,
    pool: Option<Arc<ThreadPool>>,
}

impl BlockCodec {
    /// Block codec using the largest data block the codec allows
    pub fn new(codec: ReedSolomon) -> Self {
        let block_len = codec.max_message_len();
        Self {
            codec,
            block_len,
            threads: 0,
            parallel: true,
            pool: build_pool(0, true),
        }
    }

    pub fn from_config(config: &CodecConfig) -> RsResult<Self> {
        let block_len = config.data_block_len()?;
        let codec = ReedSolomon::from_config(config)?;
        debug!(
            "Block codec: {} data + {} check symbols per block, {} threads",
            block_len,
            codec.nsym(),
            config.effective_threads()
        );

        Ok(Self {
            codec,
            block_len,
            threads: config.threads,
            parallel: config.parallel,
            pool: build_pool(config.threads, config.parallel),
        })
    }

    /// Use `block_len` data symbols per block
    pub fn with_block_len(mut self, block_len: usize) -> RsResult<Self> {
        let max = self.codec.max_message_len();
        if block_len == 0 || block_len > max {
            return Err(RsError::InvalidBlockSize {
                size: block_len,
                max,
            });
        }
        self.block_len = block_len;
        Ok(self)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self.pool = build_pool(self.threads, parallel);
        self
    }

    /// Bound the worker pool to `threads` (0 = one per CPU)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self.pool = build_pool(threads, self.parallel);
        self
    }

    /// Number of threads blocks are processed on
    pub fn worker_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    pub fn codec(&self) -> &ReedSolomon {
        &self.codec
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Length of a full encoded block
    pub fn codeword_len(&self) -> usize {
        self.block_len + self.codec.nsym()
    }

    /// Length of the encoding of `data_len` symbols
    pub fn encoded_len(&self, data_len: usize) -> usize {
        data_len + data_len.div_ceil(self.block_len) * self.codec.nsym()
    }

    /// Encode `data` block by block and concatenate the codewords
    pub fn encode(&self, data: &[Word]) -> RsResult<Vec<Word>> {
        let blocks = chunk_data(data, self.block_len)?;
        let codewords = self.process(&blocks, |_, block| self.codec.encode(block))?;
        Ok(assemble_chunks(&codewords))
    }

    /// Decode a buffer produced by [`BlockCodec::encode`]
    pub fn decode(&self, data: &[Word]) -> RsResult<BlockDecoded> {
        self.decode_with_erasures(data, &[])
    }

    /// Decode with erasure positions given as indices into the whole buffer
    pub fn decode_with_erasures(
        &self,
        data: &[Word],
        erasure_positions: &[usize],
    ) -> RsResult<BlockDecoded> {
        let codewords = chunk_data(data, self.codeword_len())?;

        let mut erasures = vec![Vec::new(); codewords.len()];
        for &position in erasure_positions {
            if position >= data.len() {
                return Err(RsError::ErasureOutOfRange {
                    position,
                    len: data.len(),
                });
            }
            erasures[position / self.codeword_len()].push(position % self.codeword_len());
        }

        let decoded = self.process(&codewords, |index, codeword| {
            let block_erasures = &erasures[index];
            let block_erasures = (!block_erasures.is_empty()).then_some(block_erasures.as_slice());
            self.codec.decode(codeword, block_erasures)
        })?;

        let corrected_blocks: Vec<usize> = decoded
            .iter()
            .enumerate()
            .filter(|(_, d)| d.corrections() > 0)
            .map(|(i, _)| i)
            .collect();
        if !corrected_blocks.is_empty() {
            debug!("Corrected blocks: {:?}", corrected_blocks);
        }

        let errors_found = decoded.iter().map(|d| d.errors_found).sum();
        let erasures = decoded.iter().map(|d| d.erasures).sum();
        let messages: Vec<Vec<Word>> = decoded.into_iter().map(|d: Decoded| d.message).collect();

        Ok(BlockDecoded {
            data: assemble_chunks(&messages),
            blocks: codewords.len(),
            corrected_blocks,
            errors_found,
            erasures,
        })
    }

    /// True if any block of an encoded buffer has nonzero syndromes
    pub fn is_corrupted(&self, data: &[Word]) -> bool {
        let codeword_len = self.codeword_len();
        match &self.pool {
            Some(pool) => pool.install(|| {
                data.par_chunks(codeword_len)
                    .any(|codeword| self.codec.is_corrupted(codeword))
            }),
            None => data
                .chunks(codeword_len)
                .any(|codeword| self.codec.is_corrupted(codeword)),
        }
    }

    /// Apply `op` to every block, tagging failures with the block index
    fn process<T, F>(&self, blocks: &[Vec<Word>], op: F) -> RsResult<Vec<T>>
    where
        T: Send,
        F: Fn(usize, &[Word]) -> RsResult<T> + Sync,
    {
        let tagged = |(index, block): (usize, &Vec<Word>)| {
            op(index, block).map_err(|source| RsError::BlockFailed {
                index,
                source: Box::new(source),
            })
        };

        match &self.pool {
            Some(pool) if blocks.len() > 1 => {
                pool.install(|| blocks.par_iter().enumerate().map(tagged).collect())
            }
            _ => blocks.iter().enumerate().map(tagged).collect(),
        }
    }
}

/// Worker pool for parallel block processing, `None` when running sequentially
fn build_pool(threads: usize, parallel: bool) -> Option<Arc<ThreadPool>> {
    if !parallel {
        return None;
    }

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(Arc::new(pool)),
        Err(e) => {
            warn!(
                "Could not build thread pool with {} threads ({}), processing sequentially",
                threads, e
            );
            None
        }
    }
}
