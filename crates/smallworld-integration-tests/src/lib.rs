//! Cross-crate tests for smallworld.
//!
//! Everything lives under `tests/`; this crate only exists to hold them.
