//! ID3 decision trees over categorical attribute data.
//!
//! Every data point is a row of attribute values followed by its target class.
//! A tree is grown by repeatedly splitting on the attribute with the highest
//! information gain, and classifies new inputs by walking from the root.

// Modules
pub mod config;
pub mod data;
pub mod errors;
pub mod metric;
pub mod node;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::{ModelIO, TreeConfig};
pub use data::Category;
pub use errors::Id3Error;
pub use metric::{entropy, information_gain};
pub use node::{Node, Path};
pub use tree::DecisionTree;
