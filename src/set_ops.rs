//! Set algebra over anything implementing [`Set`].
//!
//! Every function snapshots its inputs one at a time and builds a fresh
//! [`HashSet`]; no two sets are ever locked together.

use crate::any_value::AnyKey;
use crate::error::MapError;
use crate::set::HashSet;
use crate::traits::Set;
use std::collections::HashSet as StdHashSet;

fn snapshot(set: &dyn Set) -> Result<StdHashSet<AnyKey>, MapError> {
    Ok(set.elements()?.into_iter().collect())
}

/// Returns true if every element of `other` is in `set`
///
/// A set is a superset of itself and of the empty set.
pub fn is_superset(set: &dyn Set, other: &dyn Set) -> Result<bool, MapError> {
    let ours = snapshot(set)?;
    let theirs = other.elements()?;
    Ok(theirs.iter().all(|e| ours.contains(e)))
}

/// Elements found in either set
pub fn union(set: &dyn Set, other: &dyn Set) -> Result<HashSet, MapError> {
    let mut elements = snapshot(set)?;
    elements.extend(other.elements()?);
    Ok(HashSet::from_elements(elements))
}

/// Elements found in both sets
pub fn intersect(set: &dyn Set, other: &dyn Set) -> Result<HashSet, MapError> {
    let ours = snapshot(set)?;
    let theirs = other.elements()?;
    Ok(HashSet::from_elements(
        theirs.into_iter().filter(|e| ours.contains(e)),
    ))
}

/// Elements of `set` that are not in `other`
pub fn difference(set: &dyn Set, other: &dyn Set) -> Result<HashSet, MapError> {
    let theirs = snapshot(other)?;
    let ours = set.elements()?;
    Ok(HashSet::from_elements(
        ours.into_iter().filter(|e| !theirs.contains(e)),
    ))
}

/// Elements found in exactly one of the two sets
pub fn symmetric_difference(set: &dyn Set, other: &dyn Set) -> Result<HashSet, MapError> {
    let ours = snapshot(set)?;
    let theirs = snapshot(other)?;
    Ok(HashSet::from_elements(
        ours.symmetric_difference(&theirs).cloned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(items: &[i64]) -> HashSet {
        HashSet::from_elements(items.iter().copied().map(AnyKey::new))
    }

    #[test]
    fn test_union_and_intersect() -> Result<(), MapError> {
        let a = set_of(&[1, 2, 3]);
        let b = set_of(&[3, 4]);

        assert!(union(&a, &b)?.same(&set_of(&[1, 2, 3, 4]))?);
        assert!(intersect(&a, &b)?.same(&set_of(&[3]))?);
        assert!(intersect(&a, &set_of(&[]))?.is_empty()?);

        Ok(())
    }

    #[test]
    fn test_difference_is_one_sided() -> Result<(), MapError> {
        let a = set_of(&[1, 2, 3]);
        let b = set_of(&[3, 4]);

        assert!(difference(&a, &b)?.same(&set_of(&[1, 2]))?);
        assert!(difference(&b, &a)?.same(&set_of(&[4]))?);
        assert!(symmetric_difference(&a, &b)?.same(&set_of(&[1, 2, 4]))?);

        Ok(())
    }

    #[test]
    fn test_superset() -> Result<(), MapError> {
        let a = set_of(&[1, 2, 3]);

        assert!(is_superset(&a, &a)?);
        assert!(is_superset(&a, &set_of(&[2, 3]))?);
        assert!(is_superset(&a, &set_of(&[]))?);
        assert!(!is_superset(&a, &set_of(&[3, 4]))?);

        Ok(())
    }

    #[test]
    fn test_inputs_untouched() -> Result<(), MapError> {
        let a = set_of(&[1, 2]);
        let b = set_of(&[2, 3]);

        let u = union(&a, &b)?;
        u.add(AnyKey::new(9i64))?;

        assert_eq!(a.len()?, 2);
        assert_eq!(b.len()?, 2);

        Ok(())
    }
}
