//! Lounge Tripcode - Secretlounge-ng tripcode hash module for native and browser WASM
//!
//! This crate implements the host-side pieces of the tripcode hash type used by
//! GPU password-recovery engines:
//! - itoa64: Unix crypt alphabet and 6-bit packing
//! - des: DES Initial / Final Permutation on a pair of 32-bit halves
//! - tripcode: `!XXXXXXXXXX` <-> digest codec, candidate normalization, self-test
//! - module: the `HashModule` entry points and static module metadata

pub mod des;
pub mod error;
pub mod itoa64;
pub mod module;
pub mod tripcode;
pub mod wasm;

// Re-export main types
pub use error::ParseError;
pub use module::{HashModule, ModuleInfo, TripcodeModule};
pub use tripcode::{decode, encode, normalize_plaintext, Digest, EncodedHash};
