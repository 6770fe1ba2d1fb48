use std::io::Cursor;

use plait_ir::reconstruct;
use plait_lexer::{lex, LexerConfig};
use pretty_assertions::assert_eq;

use super::*;

/// Reader handing out at most `step` bytes per call.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails after its data runs out.
struct Failing<'a> {
    data: &'a [u8],
}

impl Read for Failing<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

const SOURCE: &str = "fn main() {\n    let s = \"h\u{e9}llo\"; // greet\n    call(s, [1.5, 2]);\n}\n";

#[test]
fn small_reads_match_plain_lexing() {
    let lexer = ChunkedLexer::default();
    let expected = lex(SOURCE, lexer.config());
    for step in [1, 2, 3, 7, 64] {
        let reader = Trickle {
            data: SOURCE.as_bytes(),
            step,
        };
        let options = StreamOptions::default().chunk_size(step);
        let tokens = read_all(&lexer, reader, &options).unwrap();
        assert_eq!(tokens, expected, "step {step}");
    }
}

#[test]
fn summary_counts() {
    let lexer = ChunkedLexer::default();
    let options = StreamOptions::default().chunk_size(4);
    let summary = drive(&lexer, Cursor::new("ab cd"), &options, |_| ControlFlow::Continue(()))
        .unwrap();
    assert_eq!(
        summary,
        DriveSummary {
            bytes: 5,
            reads: 3,
            tokens: 3,
            cancelled: false,
        }
    );
}

#[test]
fn sink_can_cancel_between_reads() {
    let lexer = ChunkedLexer::default();
    let options = StreamOptions::default().chunk_size(2);
    let mut batches = 0;
    let summary = drive(&lexer, Cursor::new("a;b;c;d;"), &options, |_| {
        batches += 1;
        ControlFlow::Break(())
    })
    .unwrap();
    assert!(summary.cancelled);
    assert_eq!(batches, 1);
    assert_eq!(summary.bytes, 2);
}

#[test]
fn io_errors_propagate() {
    let lexer = ChunkedLexer::default();
    let reader = Failing { data: b"abc" };
    let err = read_all(&lexer, reader, &StreamOptions::default()).unwrap_err();
    assert!(matches!(err, StreamError::Io(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(err.to_string(), "failed to read input: gone");
}

#[test]
fn zero_chunk_size_rejected() {
    let lexer = ChunkedLexer::default();
    let options = StreamOptions::default().chunk_size(0);
    let err = read_all(&lexer, Cursor::new("x"), &options).unwrap_err();
    assert!(matches!(err, StreamError::ZeroChunkSize));
}

#[test]
fn unknown_label_rejected() {
    let err = StreamOptions::with_label("klingon").unwrap_err();
    assert_eq!(err.to_string(), "unknown encoding label `klingon`");
}

#[test]
fn utf16_input_split_by_reads() {
    let lexer = ChunkedLexer::new(LexerConfig::default());
    let bytes: Vec<u8> = SOURCE.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let reader = Trickle {
        data: &bytes,
        step: 3,
    };
    let options = StreamOptions::with_label("utf-16le").unwrap().chunk_size(3);
    let tokens = read_all(&lexer, reader, &options).unwrap();
    assert_eq!(reconstruct(&tokens), SOURCE);
    assert_eq!(tokens, lex(SOURCE, lexer.config()));
}

#[test]
fn malformed_bytes_become_replacement_characters() {
    let lexer = ChunkedLexer::default();
    let tokens = read_all(&lexer, Cursor::new(b"ab\xFFcd"), &StreamOptions::default()).unwrap();
    assert_eq!(reconstruct(&tokens), "ab\u{FFFD}cd");
}
