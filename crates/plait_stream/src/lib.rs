//! Streaming input for plait.
//!
//! [`ChunkDecoder`] turns raw byte chunks into text chunks, holding back
//! any multi-byte sequence cut by a chunk boundary. [`drive`] pulls bytes
//! from a reader, decodes them and feeds a [`ChunkedLexer`] session,
//! handing completed tokens to a sink between reads.
//!
//! [`ChunkedLexer`]: plait_lexer::ChunkedLexer

mod decode;
mod driver;

pub use decode::{ChunkDecoder, Encoding};
pub use driver::{drive, read_all, DriveSummary, StreamError, StreamOptions, DEFAULT_CHUNK_SIZE};
