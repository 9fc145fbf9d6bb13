//! Node
//!
//! A decision node splits on one attribute and maps every value observed for it
//! during training to either a class label or a further node.
use crate::data::{partition, validate_attributes, Category};
use crate::errors::Id3Error;
use crate::metric::calc_information_gain;
use crate::utils::{homogeneous_label, majority_label};
use hashbrown::HashMap;
use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a value of the split attribute leads.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum Path<V: Category> {
    /// Terminal class label.
    Leaf(V),
    /// Further node to split on.
    Branch(Box<Node<V>>),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Node<V: Category> {
    attribute: Option<usize>,
    paths: HashMap<V, Path<V>>,
}

impl<V: Category> Default for Node<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Category> Node<V> {
    /// Create an empty node, to be populated with `build`.
    pub fn new() -> Self {
        Node {
            attribute: None,
            paths: HashMap::new(),
        }
    }

    /// The attribute this node splits on, `None` until built.
    pub fn attribute(&self) -> Option<usize> {
        self.attribute
    }

    pub fn paths(&self) -> &HashMap<V, Path<V>> {
        &self.paths
    }

    /// Get the path that should be traveled down, given a value.
    pub fn get_path(&self, value: &V) -> Option<&Path<V>> {
        self.paths.get(value)
    }

    pub fn is_built(&self) -> bool {
        self.attribute.is_some()
    }

    /// Build this node, and recursively its children, from a data set.
    ///
    /// * `data_set` - Rows of attribute values, each ending with the target class.
    pub fn build<R: AsRef<[V]>>(&mut self, data_set: &[R]) -> Result<(), Id3Error> {
        self.build_with(data_set, false)
    }

    /// Build this node, optionally evaluating attribute gains and
    /// child subtrees on the rayon thread pool.
    pub fn build_with<R: AsRef<[V]>>(&mut self, data_set: &[R], parallel: bool) -> Result<(), Id3Error> {
        let n_attributes = validate_attributes(data_set)?;
        let rows: Vec<&[V]> = data_set.iter().map(|point| point.as_ref()).collect();
        self.grow(&rows, n_attributes, parallel, 0);
        Ok(())
    }

    fn grow(&mut self, data_set: &[&[V]], n_attributes: usize, parallel: bool, depth: usize) {
        let (attribute, gain) = best_attribute(data_set, n_attributes, parallel);
        debug!(
            "Depth {}: splitting {} data points on attribute {} (gain {:.6}).",
            depth,
            data_set.len(),
            attribute,
            gain
        );
        self.attribute = Some(attribute);

        let groups = partition(data_set, attribute);
        let n_rows = data_set.len();
        let grow_group = |(value, subset): (&V, Vec<&[V]>)| {
            let path = Self::grow_path(&subset, n_rows, n_attributes, parallel, depth);
            (value.clone(), path)
        };
        self.paths = if parallel {
            groups.into_par_iter().map(grow_group).collect()
        } else {
            groups.into_iter().map(grow_group).collect()
        };
    }

    fn grow_path(subset: &[&[V]], n_parent: usize, n_attributes: usize, parallel: bool, depth: usize) -> Path<V> {
        if let Some(label) = homogeneous_label(subset) {
            trace!("Depth {}: leaf {:?} for {} data points.", depth, label, subset.len());
            return Path::Leaf(label.clone());
        }
        // The split column is kept in the subset, so a group that holds every
        // row of its parent would rebuild the same node forever.
        let exhausted = n_attributes == 1 || subset.len() == n_parent;
        if exhausted {
            let (label, tied) = majority_label(subset);
            if n_attributes > 1 {
                warn!(
                    "Depth {}: no attribute separates {} data points, falling back to majority vote.",
                    depth,
                    subset.len()
                );
            }
            if tied {
                warn!("Depth {}: majority vote tied, picked first seen class {:?}.", depth, label);
            }
            return Path::Leaf(label.clone());
        }
        let mut child = Node::new();
        child.grow(subset, n_attributes, parallel, depth + 1);
        Path::Branch(Box::new(child))
    }

    /// Predict the class of an input holding attribute values only.
    ///
    /// * `input` - Attribute values, in the column order used to build the node.
    pub fn decide(&self, input: &[V]) -> Result<&V, Id3Error> {
        let attribute = self.attribute.ok_or(Id3Error::NotFitted)?;
        let value = input.get(attribute).ok_or(Id3Error::InputLength {
            expected: attribute + 1,
            found: input.len(),
        })?;
        match self.paths.get(value) {
            Some(Path::Branch(child)) => child.decide(input),
            Some(Path::Leaf(label)) => Ok(label),
            None => Err(Id3Error::UnseenValue {
                attribute,
                value: format!("{:?}", value),
            }),
        }
    }

    /// Number of decision levels, a node with only leaves has depth 1.
    pub fn depth(&self) -> usize {
        let below = self
            .paths
            .values()
            .map(|path| match path {
                Path::Branch(child) => child.depth(),
                Path::Leaf(_) => 0,
            })
            .max()
            .unwrap_or(0);
        usize::from(self.is_built()) + below
    }

    /// Number of decision nodes, this one included.
    pub fn n_nodes(&self) -> usize {
        let children: usize = self
            .paths
            .values()
            .map(|path| match path {
                Path::Branch(child) => child.n_nodes(),
                Path::Leaf(_) => 0,
            })
            .sum();
        usize::from(self.is_built()) + children
    }

    /// Number of terminal class labels reachable from this node.
    pub fn n_leaves(&self) -> usize {
        self.paths
            .values()
            .map(|path| match path {
                Path::Branch(child) => child.n_leaves(),
                Path::Leaf(_) => 1,
            })
            .sum()
    }

    fn fmt_level(&self, f: &mut fmt::Formatter, level: usize) -> fmt::Result {
        let indent = "      ".repeat(level);
        for (value, path) in &self.paths {
            match path {
                Path::Leaf(label) => writeln!(f, "{}{:?} -> leaf={:?}", indent, value, label)?,
                Path::Branch(child) => {
                    writeln!(f, "{}{:?} -> {}", indent, value, child.header())?;
                    child.fmt_level(f, level + 1)?;
                }
            }
        }
        Ok(())
    }

    fn header(&self) -> String {
        match self.attribute {
            Some(attribute) => format!("[attribute {}]", attribute),
            None => String::from("[empty]"),
        }
    }
}

/// Select the attribute with the strictly greatest information gain,
/// the lowest index wins ties.
fn best_attribute<V: Category>(data_set: &[&[V]], n_attributes: usize, parallel: bool) -> (usize, f64) {
    let gains: Vec<f64> = if parallel {
        (0..n_attributes)
            .into_par_iter()
            .map(|i| calc_information_gain(data_set, i))
            .collect()
    } else {
        (0..n_attributes).map(|i| calc_information_gain(data_set, i)).collect()
    };
    let mut best = (0, f64::NEG_INFINITY);
    for (i, gain) in gains.into_iter().enumerate() {
        if gain > best.1 {
            best = (i, gain);
        }
    }
    best
}

impl<V: Category> fmt::Display for Node<V> {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        self.fmt_level(f, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Vec<Vec<&'static str>> {
        vec![
            vec!["Sunny", "Hot", "High", "Weak", "No"],
            vec!["Sunny", "Hot", "High", "Strong", "No"],
            vec!["Overcast", "Hot", "High", "Weak", "Yes"],
            vec!["Rain", "Mild", "High", "Weak", "Yes"],
            vec!["Rain", "Cool", "Normal", "Weak", "Yes"],
            vec!["Rain", "Cool", "Normal", "Strong", "No"],
            vec!["Overcast", "Cool", "Normal", "Strong", "Yes"],
            vec!["Sunny", "Mild", "High", "Weak", "No"],
            vec!["Sunny", "Cool", "Normal", "Weak", "Yes"],
            vec!["Rain", "Mild", "Normal", "Weak", "Yes"],
            vec!["Sunny", "Mild", "Normal", "Strong", "Yes"],
            vec!["Overcast", "Mild", "High", "Strong", "Yes"],
            vec!["Overcast", "Hot", "Normal", "Weak", "Yes"],
            vec!["Rain", "Mild", "High", "Strong", "No"],
        ]
    }

    fn branch<'a>(node: &'a Node<&'static str>, value: &'static str) -> &'a Node<&'static str> {
        match node.get_path(&value) {
            Some(Path::Branch(child)) => child.as_ref(),
            other => panic!("Expected a branch for {}, found {:?}", value, other),
        }
    }

    #[test]
    fn test_build_tree_single_class() {
        let data_set = vec![vec!["A", "X"], vec!["A", "X"], vec!["A", "X"]];
        let mut node = Node::new();
        node.build(&data_set).unwrap();

        assert_eq!(node.attribute(), Some(0));
        assert_eq!(node.get_path(&"A"), Some(&Path::Leaf("X")));
        assert_eq!(node.decide(&["A"]).unwrap(), &"X");
    }

    #[test]
    fn test_build_tree_majority() {
        let data_set = vec![vec!["A", "X"], vec!["A", "Y"], vec!["A", "Y"]];
        let mut node = Node::new();
        node.build(&data_set).unwrap();

        assert_eq!(node.attribute(), Some(0));
        assert_eq!(node.get_path(&"A"), Some(&Path::Leaf("Y")));
        assert_eq!(node.decide(&["A"]).unwrap(), &"Y");
    }

    #[test]
    fn test_build_tree_majority_tie() {
        let data_set = vec![vec!["A", "Y"], vec!["A", "X"]];
        let mut node = Node::new();
        node.build(&data_set).unwrap();
        let label = *node.decide(&["A"]).unwrap();
        assert!(label == "X" || label == "Y");
        // Ties resolve to the first class seen.
        assert_eq!(label, "Y");
    }

    #[test]
    fn test_build_tree_weather() {
        let mut node = Node::new();
        node.build(&weather()).unwrap();

        // Root attribute is Outlook.
        assert_eq!(node.attribute(), Some(0));

        let sunny = branch(&node, "Sunny");
        assert_eq!(sunny.attribute(), Some(2));
        let rain = branch(&node, "Rain");
        assert_eq!(rain.attribute(), Some(3));
        assert_eq!(node.get_path(&"Overcast"), Some(&Path::Leaf("Yes")));

        assert_eq!(sunny.get_path(&"High"), Some(&Path::Leaf("No")));
        assert_eq!(sunny.get_path(&"Normal"), Some(&Path::Leaf("Yes")));
        assert_eq!(rain.get_path(&"Strong"), Some(&Path::Leaf("No")));
        assert_eq!(rain.get_path(&"Weak"), Some(&Path::Leaf("Yes")));

        assert_eq!(node.decide(&["Overcast", "Hot", "High", "Strong"]).unwrap(), &"Yes");
        assert_eq!(node.decide(&["Rain", "Hot", "High", "Strong"]).unwrap(), &"No");
        assert_eq!(node.decide(&["Rain", "Hot", "High", "Weak"]).unwrap(), &"Yes");
        assert_eq!(node.decide(&["Sunny", "Hot", "High", "Weak"]).unwrap(), &"No");
        assert_eq!(node.decide(&["Sunny", "Hot", "Normal", "Weak"]).unwrap(), &"Yes");

        assert_eq!(node.depth(), 2);
        assert_eq!(node.n_nodes(), 3);
        assert_eq!(node.n_leaves(), 5);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let mut sequential = Node::new();
        sequential.build(&weather()).unwrap();
        let mut parallel = Node::new();
        parallel.build_with(&weather(), true).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_training_rows_round_trip() {
        let data_set = weather();
        let mut node = Node::new();
        node.build(&data_set).unwrap();
        for point in &data_set {
            let (input, label) = point.split_at(point.len() - 1);
            assert_eq!(node.decide(input).unwrap(), &label[0]);
            // Repeated decisions do not change.
            assert_eq!(node.decide(input).unwrap(), &label[0]);
        }
    }

    #[test]
    fn test_zero_gain_everywhere_terminates() {
        // Neither column carries information, the constant column 0 is picked
        // and its single group falls back to a majority vote.
        let data_set = vec![
            vec!["A", "P", "X"],
            vec!["A", "Q", "Y"],
            vec!["A", "P", "Y"],
            vec!["A", "Q", "X"],
        ];
        let mut node = Node::new();
        node.build(&data_set).unwrap();
        assert_eq!(node.attribute(), Some(0));
        assert_eq!(node.paths().len(), 1);
        assert_eq!(node.get_path(&"A"), Some(&Path::Leaf("X")));
    }

    #[test]
    fn test_used_column_reselected_in_child() {
        let data_set = vec![
            vec!["A", "P", "X"],
            vec!["A", "Q", "Y"],
            vec!["A", "P", "Y"],
            vec!["A", "Q", "X"],
            vec!["B", "P", "Z"],
            vec!["B", "Q", "Z"],
        ];
        let mut node = Node::new();
        node.build(&data_set).unwrap();
        assert_eq!(node.attribute(), Some(0));
        assert_eq!(node.get_path(&"B"), Some(&Path::Leaf("Z")));

        // The child splits on the already used column 0 again, leaving a
        // single path node.
        let child = branch(&node, "A");
        assert_eq!(child.attribute(), Some(0));
        assert_eq!(child.paths().len(), 1);
        assert_eq!(child.get_path(&"A"), Some(&Path::Leaf("X")));
    }

    #[test]
    fn test_decide_unseen_value() {
        let mut node = Node::new();
        node.build(&weather()).unwrap();
        assert_eq!(
            node.decide(&["Snow", "Hot", "High", "Weak"]),
            Err(Id3Error::UnseenValue {
                attribute: 0,
                value: String::from("\"Snow\"")
            })
        );
    }

    #[test]
    fn test_decide_short_input() {
        let mut node = Node::new();
        node.build(&weather()).unwrap();
        assert_eq!(
            node.decide(&["Sunny", "Hot"]),
            Err(Id3Error::InputLength { expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_decide_empty_node() {
        let node: Node<&str> = Node::new();
        assert_eq!(node.decide(&["A"]), Err(Id3Error::NotFitted));
        assert_eq!(node.depth(), 0);
        assert_eq!(node.n_nodes(), 0);
    }

    #[test]
    fn test_build_errors() {
        let mut node = Node::new();
        let data_set: Vec<Vec<&str>> = Vec::new();
        assert_eq!(node.build(&data_set), Err(Id3Error::EmptyDataSet));
        let data_set = vec![vec!["X"], vec!["Y"]];
        assert_eq!(node.build(&data_set), Err(Id3Error::NoAttributes));
        let data_set = vec![vec!["A", "X"], vec!["Y"]];
        assert_eq!(
            node.build(&data_set),
            Err(Id3Error::RaggedDataSet {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert!(!node.is_built());
    }

    #[test]
    fn test_display() {
        let mut node = Node::new();
        node.build(&weather()).unwrap();
        let printed = format!("{}", node);
        assert!(printed.starts_with("[attribute 0]\n"));
        assert!(printed.contains("\"Overcast\" -> leaf=\"Yes\""));
        assert!(printed.contains("\"Sunny\" -> [attribute 2]"));
        assert!(printed.contains("            \"High\" -> leaf=\"No\""));
    }
}
