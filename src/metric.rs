//! Metrics
//!
//! Entropy and information gain drive attribute selection while building a tree,
//! accuracy evaluates a fitted tree against labelled data.
use crate::data::{partition, validate_attributes, validate_data_set, Category};
use crate::errors::Id3Error;
use crate::utils::class_counts;

/// Shannon entropy (base 2) of the target class distribution of a data set.
///
/// * `data_set` - Rows of attribute values, each ending with the target class.
pub fn entropy<V: Category, R: AsRef<[V]>>(data_set: &[R]) -> Result<f64, Id3Error> {
    validate_data_set(data_set)?;
    Ok(calc_entropy(data_set))
}

/// Expected reduction in entropy from splitting a data set on an attribute.
///
/// * `data_set` - Rows of attribute values, each ending with the target class.
/// * `attribute` - Index of the attribute column to split on.
pub fn information_gain<V: Category, R: AsRef<[V]>>(data_set: &[R], attribute: usize) -> Result<f64, Id3Error> {
    let n_attributes = validate_attributes(data_set)?;
    if attribute >= n_attributes {
        return Err(Id3Error::AttributeOutOfRange {
            attribute,
            n_attributes,
        });
    }
    Ok(calc_information_gain(data_set, attribute))
}

/// Fraction of predictions equal to the expected labels.
pub fn accuracy<V: PartialEq>(y: &[V], yhat: &[V]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let hits = y.iter().zip(yhat).filter(|(a, b)| a == b).count();
    hits as f64 / y.len() as f64
}

/// Entropy of a data set that is already known to be valid.
pub(crate) fn calc_entropy<V: Category, R: AsRef<[V]>>(data_set: &[R]) -> f64 {
    let n = data_set.len() as f64;
    class_counts(data_set)
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            // log2(1) = 0, keep a pure set at exactly zero.
            if p < 1.0 {
                -p * p.log2()
            } else {
                0.0
            }
        })
        .sum()
}

/// Information gain on a data set that is already known to be valid.
pub(crate) fn calc_information_gain<V: Category, R: AsRef<[V]>>(data_set: &[R], attribute: usize) -> f64 {
    let n = data_set.len() as f64;
    let remainder: f64 = partition(data_set, attribute)
        .iter()
        .map(|(_, subset)| subset.len() as f64 / n * calc_entropy(subset))
        .sum();
    calc_entropy(data_set) - remainder
}
