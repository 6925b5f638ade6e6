//! End-to-end tests for the benchmark pipeline
//!
//! Wires the `encoder`, `harness`, and `backends` crates together through
//! the backend seam, using a stub prover so the full trial loop runs
//! without circuit artifacts.

#[cfg(test)]
mod tests;
