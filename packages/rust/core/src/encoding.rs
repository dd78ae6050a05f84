//! Candidate text encodings and strict decoders.
//!
//! Every decoder either returns the exact text the bytes represent or a
//! [`DecodeError`]; none of them substitute replacement characters. That keeps
//! the fallback chain meaningful: an encoding only "wins" if it can represent
//! every byte of the file.

use std::fmt;

/// A text encoding the reader may try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8. A leading byte-order mark is kept as U+FEFF.
    Utf8,
    /// UTF-16 little-endian. Requires a `FF FE` byte-order mark.
    Utf16Le,
    /// UTF-16 big-endian. Requires a `FE FF` byte-order mark.
    Utf16Be,
    /// Windows-1252. Bytes 0x81, 0x8D, 0x8F, 0x90 and 0x9D are undefined.
    Windows1252,
}

/// Encodings tried by the reader, most common first.
pub const CANDIDATE_ENCODINGS: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Utf16Le,
    TextEncoding::Utf16Be,
    TextEncoding::Windows1252,
];

/// A decode attempt that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid {encoding} data at byte {offset}")]
pub struct DecodeError {
    /// Encoding that rejected the input.
    pub encoding: TextEncoding,
    /// Byte offset of the first rejected unit.
    pub offset: usize,
}

impl TextEncoding {
    /// Canonical label, as used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes` strictly.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| self.error_at(e.valid_up_to())),
            Self::Utf16Le => self.decode_utf16(bytes, [0xFF, 0xFE], u16::from_le_bytes),
            Self::Utf16Be => self.decode_utf16(bytes, [0xFE, 0xFF], u16::from_be_bytes),
            Self::Windows1252 => bytes
                .iter()
                .enumerate()
                .map(|(offset, &b)| windows_1252_char(b).ok_or(self.error_at(offset)))
                .collect(),
        }
    }

    fn decode_utf16(
        self,
        bytes: &[u8],
        bom: [u8; 2],
        to_unit: fn([u8; 2]) -> u16,
    ) -> Result<String, DecodeError> {
        if !bytes.starts_with(&bom) {
            return Err(self.error_at(0));
        }
        if bytes.len() % 2 != 0 {
            return Err(self.error_at(bytes.len() - 1));
        }

        let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));

        let mut text = String::with_capacity(bytes.len() / 2);
        let mut unit_index = 0;
        for decoded in char::decode_utf16(units) {
            match decoded {
                Ok(c) => {
                    text.push(c);
                    unit_index += c.len_utf16();
                }
                Err(_) => return Err(self.error_at(unit_index * 2)),
            }
        }
        Ok(text)
    }

    fn error_at(self, offset: usize) -> DecodeError {
        DecodeError {
            encoding: self,
            offset,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Code points for 0x80..=0x9F; `None` marks the undefined slots.
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

fn windows_1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
        _ => Some(char::from(byte)),
    }
}
