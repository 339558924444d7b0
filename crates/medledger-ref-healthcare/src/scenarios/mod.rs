//! Healthcare reference scenarios.
//!
//! Each scenario wires a real `Ledger` to the reference consortium (or a
//! caller-supplied directory) and demonstrates one property of the chain.

pub mod access_matrix;
pub mod care_episode;
pub mod tamper_detection;
