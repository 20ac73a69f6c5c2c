//! Workspace root for `templa`.
//!
//! All library code lives in `crates/templa-sdk`; this crate only hosts the
//! workspace-level integration tests under `tests/`.
