//! Encoding detection and text decoding with UTF-8 fallback logic.
//!
//! This module provides robust decoding that handles:
//! - BOM detection (UTF-8, UTF-16 LE/BE)
//! - UTF-8 fast-path with strict validation
//! - Fallback encoding detection using chardetng
//! - Binary content detection

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::path::Path;

use crate::error::{ExportError, Result};

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Detect the encoding of a byte buffer.
///
/// Strategy:
/// 1. Check for BOM markers first (most reliable)
/// 2. Try strict UTF-8 decoding (fast path for most modern files)
/// 3. Fall back to chardetng for non-UTF-8 content
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Decode bytes into text, replacing invalid sequences.
///
/// Returns the decoded text and the lowercase name of the encoding used.
pub fn decode_text(bytes: &[u8]) -> (String, String) {
    let encoding = detect_encoding(bytes);
    // `decode` strips a matching BOM and sniffs UTF-16 BOMs itself.
    let (decoded, used, _had_errors) = encoding.decode(bytes);
    (decoded.into_owned(), used.name().to_lowercase())
}

/// Read a file and decode it as text.
pub fn read_text(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path).map_err(|e| ExportError::read(path, e))?;
    Ok(decode_text(&bytes))
}

/// Detect if a buffer holds binary (not text) data.
///
/// Uses two heuristics on the leading sample:
/// 1. Null byte check (strong binary indicator), skipped for UTF-16 BOMs
/// 2. Ratio of printable ASCII bytes (< 70% = likely binary), skipped when
///    the sample is valid UTF-8
pub fn is_binary_bytes(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    if sample.is_empty() {
        return false;
    }

    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        if encoding == UTF_16LE || encoding == UTF_16BE || encoding == UTF_8 {
            return false;
        }
    }

    if sample.contains(&0) {
        return true;
    }

    if utf8_prefix_valid(sample) {
        return false;
    }

    let printable_count = sample
        .iter()
        .filter(|&&b| {
            (32..=126).contains(&b) || b == 9 || b == 10 || b == 13 // printable + tab, LF, CR
        })
        .count();

    (printable_count as f64 / sample.len() as f64) < 0.70
}

/// A truncated sample may end mid-character; only an error before the final
/// three bytes counts as invalid.
fn utf8_prefix_valid(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && e.valid_up_to() + 3 >= sample.len(),
    }
}
