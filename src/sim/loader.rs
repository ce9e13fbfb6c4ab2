//! Hex instruction image loader.
//!
//! Reads a text file of whitespace-separated 32-bit hexadecimal words
//! and loads them into the front of instruction memory, in order. A
//! leading `0x`/`0X` on a token is tolerated but not required. Unread
//! entries stay zero.

use std::fs;
use std::path::Path;

use crate::common::error::{SimError, MEM_CAPACITY};
use crate::core::Cpu;

/// Parses a hex image at `path` and returns its instruction words.
pub fn load_image(path: &Path) -> Result<Vec<u32>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::ImageOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut words = Vec::new();
    for (index, token) in text.split_whitespace().enumerate() {
        let digits = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")).unwrap_or(token);
        let word = u32::from_str_radix(digits, 16).map_err(|_| SimError::ImageParse {
            path: path.to_path_buf(),
            index,
            word: token.to_string(),
        })?;
        words.push(word);
    }

    if words.len() > MEM_CAPACITY {
        return Err(SimError::ImageTooLarge {
            path: path.to_path_buf(),
            count: words.len(),
        });
    }

    Ok(words)
}

/// Loads `path` and installs the decoded words into `cpu`'s instruction memory.
pub fn load_into(cpu: &mut Cpu, path: &Path) -> Result<usize, SimError> {
    let words = load_image(path)?;
    let count = words.len();
    cpu.load_instructions(&words);
    Ok(count)
}
