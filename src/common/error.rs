//! Error taxonomy for the simulator's non-pipeline boundaries.
//!
//! The pipeline core itself never fails: unimplemented opcodes decode
//! to bubbles and unimplemented ALU funct3 combinations fall back to a
//! defined default (see `core::alu`). The errors here cover opening
//! the image file and out-of-range instruction/data memory access.

use std::path::PathBuf;

use thiserror::Error;

/// Capacity, in words, of both instruction and data memory.
pub const MEM_CAPACITY: usize = 32 * 1024;

/// Errors that can stop the simulator outside of normal pipeline execution.
#[derive(Debug, Error)]
pub enum SimError {
    /// The hex image file could not be opened or read.
    #[error("failed to open image {path:?}: {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A whitespace-separated token in the image was not valid hex.
    #[error("invalid hex word {word:?} in image {path:?} (token {index})")]
    ImageParse {
        path: PathBuf,
        index: usize,
        word: String,
    },

    /// The image contains more words than instruction memory can hold.
    #[error("image {path:?} contains {count} instructions, exceeding the {cap}-word instruction memory", cap = MEM_CAPACITY)]
    ImageTooLarge { path: PathBuf, count: usize },

    /// A load or store addressed a word index past the end of data memory.
    #[error("data memory access at word index {index} exceeds the {cap}-word capacity (pc={pc:#x})", cap = MEM_CAPACITY)]
    DataAddressOutOfRange { index: u64, pc: u64 },

    /// Fetch addressed an instruction word past the end of instruction memory.
    #[error("instruction fetch at pc={pc:#x} (word index {index}) exceeds the {cap}-word capacity", cap = MEM_CAPACITY)]
    InstructionAddressOutOfRange { pc: u64, index: u64 },
}
