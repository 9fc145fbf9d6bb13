//! Data
//!
//! Categorical data sets are plain slices of rows, where every row holds the
//! attribute values followed by the target class value. This module defines the
//! value trait and the helpers used to validate and partition such data sets.
use crate::errors::Id3Error;
use hashbrown::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Value trait used throughout the package
/// for attribute and class values.
pub trait Category: Eq + Hash + Clone + Debug + Send + Sync {}

impl<T> Category for T where T: Eq + Hash + Clone + Debug + Send + Sync {}

/// Check that a data set is non-empty and rectangular.
///
/// Returns the width of the rows, attributes plus the target column.
pub fn validate_data_set<V, R: AsRef<[V]>>(data_set: &[R]) -> Result<usize, Id3Error> {
    let first = data_set.first().ok_or(Id3Error::EmptyDataSet)?;
    let width = first.as_ref().len();
    if width == 0 {
        return Err(Id3Error::NoTargetColumn);
    }
    for (row, point) in data_set.iter().enumerate().skip(1) {
        let found = point.as_ref().len();
        if found != width {
            return Err(Id3Error::RaggedDataSet {
                row,
                expected: width,
                found,
            });
        }
    }
    Ok(width)
}

/// Check a data set and return the number of attribute columns,
/// failing if the rows only hold the target.
pub fn validate_attributes<V, R: AsRef<[V]>>(data_set: &[R]) -> Result<usize, Id3Error> {
    match validate_data_set(data_set)? {
        1 => Err(Id3Error::NoAttributes),
        width => Ok(width - 1),
    }
}

/// Split the rows of a data set by the value held in `column`.
///
/// Groups come back in the order their value is first seen in the data,
/// and the rows inside a group keep their original order.
pub fn partition<'a, V: Category, R: AsRef<[V]>>(data_set: &'a [R], column: usize) -> Vec<(&'a V, Vec<&'a [V]>)> {
    let mut position: HashMap<&V, usize> = HashMap::new();
    let mut groups: Vec<(&V, Vec<&[V]>)> = Vec::new();
    for point in data_set {
        let point = point.as_ref();
        let value = &point[column];
        match position.get(value) {
            Some(&i) => groups[i].1.push(point),
            None => {
                position.insert(value, groups.len());
                groups.push((value, vec![point]));
            }
        }
    }
    groups
}
