//! Feature modules - one vertical slice per analyzer family.
//!
//! Each slice owns its value objects (`types`), its analyzer entry
//! point, and the helpers behind it. Slices only share code through
//! `crate::shared`.

pub mod beans;
pub mod cycles;
pub mod entrypoints;
pub mod layering;
pub mod relationships;
