//! Perforce command-line wrapper built around a decoder for `p4 -G` output.

/// Decoder for the tagged marshal stream emitted by `p4 -G`.
pub mod marshal;
/// Subprocess runner, spec forms, and typed record views over decoded output.
pub mod p4;
