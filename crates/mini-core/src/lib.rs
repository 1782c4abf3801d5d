//! Core routines shared by the `mini-png` family of crates
//!
//! This crate holds the pieces that don't belong to any single layer:
//!
//! - A bytestream reader with endian-aware reads ([`bytestream`])
//! - Pixel-type and bit-depth classification shared by the container
//!   parser and a future renderer ([`colorspace`], [`bit_depth`])
//! - Decoder options respected across layers ([`options`])
pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
