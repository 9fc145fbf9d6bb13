//! Tree Configuration
//!
//! Defines the configuration used when fitting a decision tree, and the
//! JSON persistence shared by fitted models.
use crate::errors::Id3Error;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for fitting a decision tree.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct TreeConfig {
    /// Evaluate attribute gains and child subtrees on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

/// IO
pub trait ModelIO: Serialize + DeserializeOwned + Sized {
    /// Save a model as a json object to a file.
    ///
    /// * `path` - Path to save model.
    fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<(), Id3Error> {
        fs::write(path, self.json_dump()?).map_err(|e| Id3Error::UnableToWrite(e.to_string()))
    }

    /// Dump a model as a json object
    fn json_dump(&self) -> Result<String, Id3Error> {
        serde_json::to_string(self).map_err(|e| Id3Error::UnableToWrite(e.to_string()))
    }

    /// Load a model from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, Id3Error> {
        serde_json::from_str::<Self>(json_str).map_err(|e| Id3Error::UnableToRead(e.to_string()))
    }

    /// Load a model from a path to a json model object.
    ///
    /// * `path` - Path to load model from.
    fn load_model<P: AsRef<Path>>(path: P) -> Result<Self, Id3Error> {
        let json_str = fs::read_to_string(path).map_err(|e| Id3Error::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ModelIO for TreeConfig {}
