//! Decision Tree
//!
//! The fitted model: configuration, the root node and the shape of the data it
//! was trained on.
use crate::config::{ModelIO, TreeConfig};
use crate::data::{validate_attributes, Category};
use crate::errors::Id3Error;
use crate::metric::accuracy;
use crate::node::Node;
use crate::utils::target;
use log::info;
use rayon::prelude::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::{self, Display};

/// ID3 decision tree classifier over categorical values.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct DecisionTree<V: Category> {
    pub cfg: TreeConfig,
    root: Option<Node<V>>,
    n_attributes: usize,
}

impl<V: Category> Default for DecisionTree<V> {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl<V: Category> DecisionTree<V> {
    pub fn new(cfg: TreeConfig) -> Self {
        DecisionTree {
            cfg,
            root: None,
            n_attributes: 0,
        }
    }

    /// Fit the tree on a data set, replacing any previous fit.
    ///
    /// * `data_set` - Rows of attribute values, each ending with the target class.
    pub fn fit<R: AsRef<[V]>>(&mut self, data_set: &[R]) -> Result<(), Id3Error> {
        let n_attributes = validate_attributes(data_set)?;
        let mut root = Node::new();
        root.build_with(data_set, self.cfg.parallel)?;
        info!(
            "Fitted tree on {} data points with {} attributes: {} nodes, {} leaves, depth {}.",
            data_set.len(),
            n_attributes,
            root.n_nodes(),
            root.n_leaves(),
            root.depth()
        );
        self.root = Some(root);
        self.n_attributes = n_attributes;
        Ok(())
    }

    /// Predict the class of a single input of attribute values.
    pub fn predict_row(&self, input: &[V]) -> Result<&V, Id3Error> {
        let root = self.root.as_ref().ok_or(Id3Error::NotFitted)?;
        if input.len() != self.n_attributes {
            return Err(Id3Error::InputLength {
                expected: self.n_attributes,
                found: input.len(),
            });
        }
        root.decide(input)
    }

    /// Predict the class of every input, failing on the first input that
    /// cannot be decided.
    pub fn predict<R: AsRef<[V]> + Sync>(&self, inputs: &[R]) -> Result<Vec<V>, Id3Error> {
        if self.cfg.parallel {
            inputs
                .par_iter()
                .map(|input| self.predict_row(input.as_ref()).cloned())
                .collect()
        } else {
            inputs
                .iter()
                .map(|input| self.predict_row(input.as_ref()).cloned())
                .collect()
        }
    }

    /// Accuracy of the tree on a labelled data set.
    pub fn score<R: AsRef<[V]>>(&self, data_set: &[R]) -> Result<f64, Id3Error> {
        let n_attributes = validate_attributes(data_set)?;
        let mut y = Vec::with_capacity(data_set.len());
        let mut yhat = Vec::with_capacity(data_set.len());
        for point in data_set {
            let point = point.as_ref();
            y.push(target(point));
            yhat.push(self.predict_row(&point[..n_attributes])?);
        }
        Ok(accuracy(&y, &yhat))
    }

    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Number of attribute columns seen when fitting.
    pub fn n_attributes(&self) -> usize {
        self.n_attributes
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    pub fn n_nodes(&self) -> usize {
        self.root.as_ref().map_or(0, Node::n_nodes)
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, Node::n_leaves)
    }

    // Set methods for parameters

    /// Set the configuration on the tree.
    /// * `cfg` - Settings used by the next fit.
    pub fn set_config(mut self, cfg: TreeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set whether fitting and batch prediction run in parallel.
    /// * `parallel` - Use the rayon thread pool.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }
}

impl<V: Category + Serialize + DeserializeOwned> ModelIO for DecisionTree<V> {}

impl<V: Category> Display for DecisionTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => writeln!(f, "[not fitted]"),
        }
    }
}
