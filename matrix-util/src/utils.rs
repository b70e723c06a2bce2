use fnv::FnvHashMap as HashMap;
use rayon::prelude::*;
use std::hash::Hash;

/// partition membership vector into groups of indexes
/// # Arguments
/// * `membership` - a vector of membership (E.g., block assignment of vertices)
/// # Returns
/// `(group, indexes)` pairs in the ascending order of the group;
/// indexes within each group are ascending too
pub fn partition_by_membership<T>(membership: &[T]) -> Vec<(T, Vec<usize>)>
where
    T: Eq + Hash + Ord + Clone + Send + Sync,
{
    let mut groups: HashMap<T, Vec<usize>> = HashMap::default();
    for (elem, k) in membership.iter().enumerate() {
        groups.entry(k.clone()).or_default().push(elem);
    }

    let mut groups: Vec<(T, Vec<usize>)> = groups.into_iter().collect();
    groups.par_sort_unstable_by(|a, b| a.0.cmp(&b.0));
    groups
}
