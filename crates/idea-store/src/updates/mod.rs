//! Partial-update types for entity mutations.
//!
//! Each update struct has one `Option` slot per mutable field. `None` leaves the
//! stored value untouched; `Some` replaces it. Both backends merge through the
//! same routine so absent-means-unchanged holds regardless of the store.

pub mod idea;
