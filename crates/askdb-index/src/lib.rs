//! askdb-index
//!
//! Tf-idf vectorization of record questions and the swap-on-rebuild store
//! that owns the current snapshot. See the `index` and `store` modules.

pub mod tokenize;
pub mod index;
pub mod store;

pub use index::{Index, SparseVector};
pub use store::IndexStore;
