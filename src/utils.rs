use crate::data::Category;
use hashbrown::HashMap;

/// Target class of a data point, always the last value.
#[inline]
pub fn target<V>(point: &[V]) -> &V {
    &point[point.len() - 1]
}

/// Count how often each value appears in `column`.
pub fn value_counts<'a, V: Category, R: AsRef<[V]>>(data_set: &'a [R], column: usize) -> HashMap<&'a V, usize> {
    let mut counts = HashMap::new();
    for point in data_set {
        *counts.entry(&point.as_ref()[column]).or_insert(0) += 1;
    }
    counts
}

/// Count how often each target class appears.
pub fn class_counts<'a, V: Category, R: AsRef<[V]>>(data_set: &'a [R]) -> HashMap<&'a V, usize> {
    let mut counts = HashMap::new();
    for point in data_set {
        *counts.entry(target(point.as_ref())).or_insert(0) += 1;
    }
    counts
}

/// The class shared by every data point, if there is exactly one.
pub fn homogeneous_label<V: Category, R: AsRef<[V]>>(data_set: &[R]) -> Option<&V> {
    let mut labels = data_set.iter().map(|point| target(point.as_ref()));
    let first = labels.next()?;
    labels.all(|label| label == first).then_some(first)
}

/// Most frequent class of a non-empty data set.
///
/// Among equally frequent classes the one seen first in the data wins.
/// The second value reports whether such a tie happened.
pub fn majority_label<V: Category, R: AsRef<[V]>>(data_set: &[R]) -> (&V, bool) {
    let counts = class_counts(data_set);
    let mut best = target(data_set[0].as_ref());
    let mut best_count = counts[&best];
    let mut tied = false;
    for point in data_set {
        let label = target(point.as_ref());
        let count = counts[&label];
        if count > best_count {
            best = label;
            best_count = count;
            tied = false;
        } else if count == best_count && label != best {
            tied = true;
        }
    }
    (best, tied)
}
