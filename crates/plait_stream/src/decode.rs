//! Incremental byte decoding.

use std::fmt;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Supported input encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
}

impl Encoding {
    /// Encoding for a label such as `"utf-8"` or `"ISO-8859-1"`.
    pub fn for_label(label: &str) -> Option<Encoding> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" => Some(Encoding::Utf8),
            "utf-16le" | "utf-16" => Some(Encoding::Utf16Le),
            "utf-16be" => Some(Encoding::Utf16Be),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" | "l1" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoder for one byte stream.
///
/// Holds at most one incomplete sequence between calls: up to three bytes
/// of UTF-8, or an odd byte plus an unpaired high surrogate of UTF-16.
/// Invalid sequences decode to U+FFFD, as does a sequence still
/// incomplete when the final chunk arrives.
#[derive(Clone, Debug, Default)]
pub struct ChunkDecoder {
    encoding: Encoding,
    carry: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new(encoding: Encoding) -> Self {
        ChunkDecoder {
            encoding,
            carry: Vec::new(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Bytes held back from earlier chunks.
    pub fn carried(&self) -> usize {
        self.carry.len()
    }

    /// Decode the next chunk of bytes.
    pub fn decode(&mut self, bytes: &[u8], is_final: bool) -> String {
        let mut data = std::mem::take(&mut self.carry);
        data.extend_from_slice(bytes);
        let mut out = String::with_capacity(data.len());
        match self.encoding {
            Encoding::Utf8 => self.decode_utf8(&data, is_final, &mut out),
            Encoding::Utf16Le => self.decode_utf16(&data, u16::from_le_bytes, is_final, &mut out),
            Encoding::Utf16Be => self.decode_utf16(&data, u16::from_be_bytes, is_final, &mut out),
            Encoding::Latin1 => out.extend(data.iter().copied().map(char::from)),
        }
        out
    }

    fn decode_utf8(&mut self, mut rest: &[u8], is_final: bool, out: &mut String) {
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            rest = &tail[len..];
                        }
                        // Truncated sequence at the end of the data.
                        None => {
                            if is_final {
                                out.push(REPLACEMENT);
                            } else {
                                self.carry.extend_from_slice(tail);
                            }
                            return;
                        }
                    }
                }
            }
        }
    }

    fn decode_utf16(
        &mut self,
        data: &[u8],
        unit: fn([u8; 2]) -> u16,
        is_final: bool,
        out: &mut String,
    ) {
        let mut units: Vec<u16> = data
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]))
            .collect();
        let odd = data.len() % 2 == 1;

        if !is_final {
            let mut keep = usize::from(odd);
            if units
                .last()
                .is_some_and(|&last| (0xD800..=0xDBFF).contains(&last))
            {
                units.pop();
                keep += 2;
            }
            self.carry.extend_from_slice(&data[data.len() - keep..]);
        }

        out.extend(char::decode_utf16(units).map(|c| c.unwrap_or(REPLACEMENT)));
        if is_final && odd {
            out.push(REPLACEMENT);
        }
    }
}
