use crate::any_value::AnyKey;
use crate::error::MapError;
use crate::traits::Set;
use std::collections::HashSet as StdHashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A thread-safe set of heterogeneous, hashable elements
///
/// Elements are [`AnyKey`]s, so a single set can hold integers, strings and
/// tuples side by side. Membership uses value equality: adding an element that
/// compares equal to one already present is a no-op. Cloning the set gives
/// another handle to the same members.
///
/// # Examples
///
/// ```
/// use sovran_containers::{AnyKey, HashSet, MapError};
///
/// let set = HashSet::new();
/// assert!(set.add(AnyKey::new("a"))?);
/// assert!(!set.add(AnyKey::new("a"))?);
/// assert!(set.add(AnyKey::new((1i64, "b".to_string())))?);
/// assert_eq!(set.len()?, 2);
///
/// set.remove(&AnyKey::new("a"))?;
/// assert!(!set.contains(&AnyKey::new("a"))?);
/// # Ok::<(), MapError>(())
/// ```
#[derive(Clone)]
pub struct HashSet {
    elements: Arc<Mutex<StdHashSet<AnyKey>>>,
}

impl HashSet {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty set with room for at least `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        log::trace!("new HashSet with capacity {}", capacity);
        Self {
            elements: Arc::new(Mutex::new(StdHashSet::with_capacity(capacity))),
        }
    }

    pub(crate) fn from_elements<I: IntoIterator<Item = AnyKey>>(elements: I) -> Self {
        Self {
            elements: Arc::new(Mutex::new(elements.into_iter().collect())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StdHashSet<AnyKey>>, MapError> {
        self.elements.lock().map_err(|_| {
            log::warn!("HashSet lock poisoned");
            MapError::LockError
        })
    }

    /// Adds `element`, returning true if it was not already present
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn add(&self, element: AnyKey) -> Result<bool, MapError> {
        let mut elements = self.lock()?;
        Ok(elements.insert(element))
    }

    /// Removes `element` if present
    ///
    /// # Returns
    ///
    /// Returns `Ok(true)` if the element was present and removed, `Ok(false)` if not present.
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn remove(&self, element: &AnyKey) -> Result<bool, MapError> {
        let mut elements = self.lock()?;
        Ok(elements.remove(element))
    }

    /// Removes every element
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn clear(&self) -> Result<(), MapError> {
        let mut elements = self.lock()?;
        log::trace!("clearing {} elements", elements.len());
        elements.clear();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn contains(&self, element: &AnyKey) -> Result<bool, MapError> {
        let elements = self.lock()?;
        Ok(elements.contains(element))
    }

    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn len(&self) -> Result<usize, MapError> {
        let elements = self.lock()?;
        Ok(elements.len())
    }

    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn is_empty(&self) -> Result<bool, MapError> {
        let elements = self.lock()?;
        Ok(elements.is_empty())
    }

    /// Returns a snapshot of the members, in no particular order
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn elements(&self) -> Result<Vec<AnyKey>, MapError> {
        let elements = self.lock()?;
        Ok(elements.iter().cloned().collect())
    }

    /// Returns true if `other` has exactly the same members
    ///
    /// `other` is snapshotted before this set is locked, so comparing a set
    /// with itself (or with a clone of itself) is safe.
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if either lock cannot be acquired.
    pub fn same(&self, other: &dyn Set) -> Result<bool, MapError> {
        let theirs = other.elements()?;
        let elements = self.lock()?;
        Ok(theirs.len() == elements.len() && theirs.iter().all(|e| elements.contains(e)))
    }
}

impl Default for HashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elements() {
            Ok(elements) => f.debug_set().entries(elements.iter()).finish(),
            Err(_) => f.write_str("HashSet{<poisoned>}"),
        }
    }
}

impl fmt::Display for HashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashSet{")?;
        let elements = match self.elements() {
            Ok(elements) => elements,
            Err(_) => return f.write_str("<poisoned>}"),
        };
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() -> Result<(), MapError> {
        let set = HashSet::new();

        assert!(set.add(AnyKey::new("a"))?);
        assert!(!set.add(AnyKey::new("a"))?);
        assert_eq!(set.len()?, 1);

        assert!(set.remove(&AnyKey::new("a"))?);
        assert!(!set.contains(&AnyKey::new("a"))?);
        assert!(!set.remove(&AnyKey::new("a"))?);
        assert!(set.is_empty()?);

        Ok(())
    }

    #[test]
    fn test_heterogeneous_members() -> Result<(), MapError> {
        let set = HashSet::with_capacity(4);

        set.add(AnyKey::new(1i64))?;
        set.add(AnyKey::new(1i32))?;
        set.add(AnyKey::new("1".to_string()))?;
        set.add(AnyKey::new((1i64, "1".to_string())))?;
        assert_eq!(set.len()?, 4);

        assert!(!set.add(AnyKey::new((1i64, "1".to_string())))?);
        assert_eq!(set.len()?, 4);

        Ok(())
    }

    #[test]
    fn test_same_with_self_and_clone() -> Result<(), MapError> {
        let set = HashSet::new();
        set.add(AnyKey::new('x'))?;

        assert!(set.same(&set)?);
        assert!(set.same(&set.clone())?);

        Ok(())
    }

    #[test]
    fn test_same_compares_membership() -> Result<(), MapError> {
        let a = HashSet::new();
        let b = HashSet::new();
        for i in 0..5i64 {
            a.add(AnyKey::new(i))?;
            b.add(AnyKey::new(4 - i))?;
        }
        assert!(a.same(&b)?);
        assert!(b.same(&a)?);

        b.remove(&AnyKey::new(0i64))?;
        b.add(AnyKey::new(99i64))?;
        assert!(!a.same(&b)?);
        assert!(!b.same(&a)?);

        Ok(())
    }

    #[test]
    fn test_clear() -> Result<(), MapError> {
        let set = HashSet::from_elements((0..10u8).map(AnyKey::new));
        assert_eq!(set.len()?, 10);
        set.clear()?;
        assert!(set.elements()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_display_lists_every_element() -> Result<(), MapError> {
        let set = HashSet::new();
        set.add(AnyKey::new("ABC"))?;
        set.add(AnyKey::new(12345i64))?;

        let text = set.to_string();
        assert!(text.starts_with("HashSet{"));
        assert!(text.contains("ABC"));
        assert!(text.contains("12345"));

        Ok(())
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Fragile(bool);

    impl std::hash::Hash for Fragile {
        fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
            if self.0 {
                panic!("unhashable");
            }
            state.write_u8(0);
        }
    }

    #[test]
    fn test_display_survives_poisoned_lock() {
        let set = HashSet::new();
        set.add(AnyKey::new(Fragile(false))).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = set.add(AnyKey::new(Fragile(true)));
        }));
        assert!(result.is_err());
        assert!(matches!(set.len(), Err(MapError::LockError)));

        assert_eq!(set.to_string(), "HashSet{<poisoned>}");
        assert_eq!(format!("{:?}", set), "HashSet{<poisoned>}");
    }
}
