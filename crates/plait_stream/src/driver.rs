//! Reader-driven streaming sessions.

use std::io::{self, Read};
use std::ops::ControlFlow;

use plait_ir::Token;
use plait_lexer::{ChunkedLexer, ConfigError, StreamFault, StreamStatus};
use tracing::debug;

use crate::decode::{ChunkDecoder, Encoding};

/// Default number of bytes per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Error driving a streaming session.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("unknown encoding label `{0}`")]
    UnknownEncoding(String),
    #[error("chunk size must be at least one byte")]
    ZeroChunkSize,
    #[error("invalid lexer configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("lexer rejected a chunk: {0}")]
    Fault(#[from] StreamFault),
}

/// How input bytes are read and decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOptions {
    pub encoding: Encoding,
    /// Bytes requested per read.
    pub chunk_size: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions {
            encoding: Encoding::Utf8,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StreamOptions {
    /// Default options reading the encoding named by `label`.
    pub fn with_label(label: &str) -> Result<Self, StreamError> {
        let encoding = Encoding::for_label(label)
            .ok_or_else(|| StreamError::UnknownEncoding(label.to_owned()))?;
        Ok(StreamOptions {
            encoding,
            ..StreamOptions::default()
        })
    }

    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// What a [`drive`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveSummary {
    pub bytes: u64,
    pub reads: usize,
    pub tokens: usize,
    /// The sink stopped the session before end of input.
    pub cancelled: bool,
}

/// Lex everything `reader` yields, one read at a time.
///
/// Each batch of completed top-level tokens goes to `sink`; the next read
/// is issued only after the sink returns. Returning
/// [`ControlFlow::Break`] ends the session without reading further.
pub fn drive<R, F>(
    lexer: &ChunkedLexer,
    mut reader: R,
    options: &StreamOptions,
    mut sink: F,
) -> Result<DriveSummary, StreamError>
where
    R: Read,
    F: FnMut(Vec<Token>) -> ControlFlow<()>,
{
    if options.chunk_size == 0 {
        return Err(StreamError::ZeroChunkSize);
    }
    lexer.config().validate()?;

    let mut decoder = ChunkDecoder::new(options.encoding);
    let mut state = lexer.start();
    let mut buf = vec![0u8; options.chunk_size];
    let mut summary = DriveSummary::default();

    loop {
        let read = match reader.read(&mut buf) {
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        let is_final = read == 0;
        summary.reads += 1;
        summary.bytes += read as u64;

        let text = decoder.decode(&buf[..read], is_final);
        let output = lexer.process(&mut state, &text, is_final);
        if let StreamStatus::Error(fault) = output.status {
            return Err(fault.into());
        }
        if !output.tokens.is_empty() {
            summary.tokens += output.tokens.len();
            if sink(output.tokens).is_break() {
                debug!(bytes = summary.bytes, tokens = summary.tokens, "stream cancelled");
                summary.cancelled = true;
                return Ok(summary);
            }
        }
        if is_final {
            debug!(
                bytes = summary.bytes,
                reads = summary.reads,
                tokens = summary.tokens,
                "stream complete"
            );
            return Ok(summary);
        }
    }
}

/// Lex a whole reader into one token list.
pub fn read_all<R: Read>(
    lexer: &ChunkedLexer,
    reader: R,
    options: &StreamOptions,
) -> Result<Vec<Token>, StreamError> {
    let mut tokens = Vec::new();
    drive(lexer, reader, options, |batch| {
        tokens.extend(batch);
        ControlFlow::Continue(())
    })?;
    Ok(tokens)
}

#[cfg(test)]
mod tests;
