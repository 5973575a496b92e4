pub mod args;
pub mod blocks;
pub mod chunker;
pub mod config;
pub mod reed_solomon;

pub use args::build_cli;
pub use blocks::{BlockCodec, BlockDecoded};
pub use chunker::{assemble_chunks, chunk_data};
pub use config::CodecConfig;
pub use reed_solomon::{Decoded, ErrorKind, GaloisField, Polynomial, ReedSolomon, RsError, RsResult};
