//! Text encodings tried when decoding CSV uploads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate text encoding for CSV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// Strict UTF-8.
    Utf8,
    /// UTF-8 preceded by an optional byte-order mark.
    Utf8Sig,
    /// Windows code page 1252.
    Cp1252,
    /// ISO-8859-1; every byte decodes.
    Latin1,
}

/// The fixed order in which CSV input is decoded. The first candidate that yields a table wins.
pub const ENCODING_FALLBACKS: [TextEncoding; 4] = [
    TextEncoding::Utf8,
    TextEncoding::Utf8Sig,
    TextEncoding::Cp1252,
    TextEncoding::Latin1,
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// Bytes Windows-1252 leaves unassigned. WHATWG maps them to C1 controls; the code page itself
// rejects them.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl TextEncoding {
    /// Conventional label for this encoding.
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Cp1252 => "cp1252",
            TextEncoding::Latin1 => "latin1",
        }
    }

    /// Decode `bytes`, returning `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                encoding_rs::UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|s| s.into_owned())
            }
            TextEncoding::Cp1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|s| s.into_owned())
            }
            // encoding_rs follows WHATWG, where the "latin1" label means windows-1252, so the
            // identity mapping is done by hand.
            TextEncoding::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
