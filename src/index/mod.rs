//! In-memory index structures
//!
//! - `chained_map`: fixed-bucket hash map used as the postings dictionary
//! - `sets`: intersection/union of posting lists
//! - `balanced_tree`: AVL tree for id lookup
//! - `bplus_tree`: B+Tree multi-map for point and range lookup
//! - `value_store`: append-only storage the B+Tree leaves point into
//! - `inverted_index`: term postings

pub mod balanced_tree;
pub mod bplus_tree;
pub mod chained_map;
pub mod inverted_index;
pub mod sets;
pub mod value_store;

pub use balanced_tree::BalancedTree;
pub use bplus_tree::BPlusTree;
pub use chained_map::ChainedHashMap;
pub use inverted_index::InvertedIndex;
pub use value_store::{Position, ValueStore, VecStore};
