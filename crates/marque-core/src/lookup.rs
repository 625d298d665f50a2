//! Sentinel lookup over ordered label lists.
//!
//! Index 0 is a valid hit, so "not found" cannot be a single flag: a lookup
//! must distinguish a missing container (no record stored under the key at
//! all) from a present container that does not hold the value. `Lookup`
//! carries all three outcomes explicitly.

use crate::types::LabelId;

/// Outcome of searching an ordered list stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// No record exists under the container key.
    ContainerMissing,
    /// The record exists but does not contain the value.
    ValueMissing,
    /// The value sits at this position.
    FoundAt(usize),
}

impl Lookup {
    /// `true` only for a real hit.
    #[must_use]
    pub fn found(&self) -> bool {
        matches!(self, Self::FoundAt(_))
    }
}

/// Search `list` for `target`. `None` models an absent container.
pub fn find(list: Option<&[LabelId]>, target: &LabelId) -> Lookup {
    let Some(list) = list else {
        return Lookup::ContainerMissing;
    };
    match list.iter().position(|stored| stored == target) {
        Some(index) => Lookup::FoundAt(index),
        None => Lookup::ValueMissing,
    }
}

/// Remove `target` from `list`, preserving the relative order of every
/// remaining element. Returns `None` when the value is absent, leaving the
/// caller's record untouched. An empty result means the caller must drop
/// the container record entirely: absence and emptiness are the same state.
pub fn remove_preserving_order(list: &[LabelId], target: &LabelId) -> Option<Vec<LabelId>> {
    let mut next = Vec::with_capacity(list.len().saturating_sub(1));
    let mut found = false;
    for stored in list {
        if stored == target && !found {
            found = true;
        } else {
            next.push(stored.clone());
        }
    }
    found.then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(code: &str) -> LabelId {
        LabelId::new(code).expect("test label code must be valid")
    }

    #[test]
    fn find_distinguishes_missing_container_from_missing_value() {
        let target = label("US");
        assert_eq!(find(None, &target), Lookup::ContainerMissing);

        let list = vec![label("DE"), label("FR")];
        assert_eq!(find(Some(&list), &target), Lookup::ValueMissing);
    }

    #[test]
    fn find_reports_index_zero_as_a_hit() {
        let list = vec![label("US"), label("DE")];
        let result = find(Some(&list), &label("US"));
        assert_eq!(result, Lookup::FoundAt(0));
        assert!(result.found());
    }

    #[test]
    fn find_reports_later_positions() {
        let list = vec![label("DE"), label("FR"), label("US")];
        assert_eq!(find(Some(&list), &label("US")), Lookup::FoundAt(2));
    }

    #[test]
    fn removal_preserves_relative_order() {
        let list = vec![label("DE"), label("FR"), label("US"), label("JP")];
        let next = remove_preserving_order(&list, &label("FR"))
            .expect("value is present and must be removed");
        assert_eq!(next, vec![label("DE"), label("US"), label("JP")]);
    }

    #[test]
    fn removal_of_absent_value_returns_none() {
        let list = vec![label("DE")];
        assert!(remove_preserving_order(&list, &label("US")).is_none());
    }

    #[test]
    fn removal_of_only_element_yields_empty_list() {
        let list = vec![label("US")];
        let next = remove_preserving_order(&list, &label("US"))
            .expect("sole value must be removable");
        assert!(next.is_empty());
    }
}
