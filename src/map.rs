use crate::any_value::{AnyKey, AnyValue};
use crate::descriptor::{Described, TypeDescriptor};
use crate::error::MapError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A thread-safe map whose key and value types are fixed at runtime
///
/// `ConcurrentMap` is meant for code that only learns the types it works with
/// at runtime. The key and value [`TypeDescriptor`]s are chosen when the map
/// is created; every `put` is checked against them and rejected, without
/// touching the map, when either side has the wrong type. Cloning the map
/// gives another handle to the same entries.
///
/// Keys must be `Eq + Hash`, so `f64` cannot be the key type; use
/// [`FloatKey`](crate::FloatKey) for float keys. `f64` values are fine.
///
/// # Examples
///
/// ```
/// use sovran_containers::{AnyKey, AnyValue, ConcurrentMap, MapError, TypeDescriptor};
///
/// let map = ConcurrentMap::new(TypeDescriptor::of::<i64>(), TypeDescriptor::of::<String>());
///
/// // First insert has no previous value
/// let prev = map.put(AnyKey::new(1i64), AnyValue::new("one".to_string()))?;
/// assert!(prev.is_none());
///
/// // Values of the wrong type are refused
/// let err = map.put(AnyKey::new(2i64), AnyValue::new(2i64)).unwrap_err();
/// assert!(matches!(err, MapError::ValueTypeMismatch { .. }));
/// assert_eq!(map.len()?, 1);
///
/// let one: Option<String> = map.get_as(&AnyKey::new(1i64))?;
/// assert_eq!(one.as_deref(), Some("one"));
/// # Ok::<(), MapError>(())
/// ```
#[derive(Clone)]
pub struct ConcurrentMap {
    key_type: TypeDescriptor,
    val_type: TypeDescriptor,
    entries: Arc<Mutex<HashMap<AnyKey, AnyValue>>>,
}

impl ConcurrentMap {
    /// Creates an empty map accepting only `key_type` keys and `val_type` values
    pub fn new(key_type: TypeDescriptor, val_type: TypeDescriptor) -> Self {
        Self::with_capacity(key_type, val_type, 0)
    }

    /// Creates an empty map with room for at least `capacity` entries
    pub fn with_capacity(key_type: TypeDescriptor, val_type: TypeDescriptor, capacity: usize) -> Self {
        log::trace!("new ConcurrentMap<{}, {}>", key_type, val_type);
        Self {
            key_type,
            val_type,
            entries: Arc::new(Mutex::new(HashMap::with_capacity(capacity))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AnyKey, AnyValue>>, MapError> {
        self.entries.lock().map_err(|_| {
            log::warn!("ConcurrentMap<{}, {}> lock poisoned", self.key_type, self.val_type);
            MapError::LockError
        })
    }

    fn check(&self, key: &AnyKey, value: &AnyValue) -> Result<(), MapError> {
        if !self.key_type.matches(key) {
            log::debug!("rejected key {:?}: expected {}, found {}", key, self.key_type, key.descriptor());
            return Err(MapError::KeyTypeMismatch {
                expected: self.key_type,
                found: key.descriptor(),
            });
        }
        if !self.val_type.matches(value) {
            log::debug!("rejected value {:?}: expected {}, found {}", value, self.val_type, value.descriptor());
            return Err(MapError::ValueTypeMismatch {
                expected: self.val_type,
                found: value.descriptor(),
            });
        }
        Ok(())
    }

    /// Stores `value` under `key`, returning the value it replaced
    ///
    /// # Errors
    ///
    /// - Returns `MapError::KeyTypeMismatch` if `key` is not of the key type
    /// - Returns `MapError::ValueTypeMismatch` if `value` is not of the value type
    /// - Returns `MapError::LockError` if the internal lock cannot be acquired
    ///
    /// A rejected put leaves the map untouched.
    pub fn put(&self, key: AnyKey, value: AnyValue) -> Result<Option<AnyValue>, MapError> {
        self.check(&key, &value)?;
        let mut entries = self.lock()?;
        Ok(entries.insert(key, value))
    }

    /// Returns the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn get(&self, key: &AnyKey) -> Result<Option<AnyValue>, MapError> {
        let entries = self.lock()?;
        Ok(entries.get(key).cloned())
    }

    /// Returns a clone of the value stored under `key`, downcast to `T`
    ///
    /// # Errors
    ///
    /// - Returns `MapError::ValueTypeMismatch` if `T` is not the value type
    /// - Returns `MapError::LockError` if the internal lock cannot be acquired
    pub fn get_as<T: Any + Clone>(&self, key: &AnyKey) -> Result<Option<T>, MapError> {
        self.with(key, |value: &T| value.clone())
    }

    /// Runs `f` on the value stored under `key` without cloning it
    ///
    /// Returns `Ok(None)` if the key is absent. `f` runs while the map is
    /// locked and must not call back into this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_containers::{AnyKey, AnyValue, ConcurrentMap, MapError, TypeDescriptor};
    ///
    /// let map = ConcurrentMap::new(TypeDescriptor::of::<u32>(), TypeDescriptor::of::<Vec<u8>>());
    /// map.put(AnyKey::new(7u32), AnyValue::new(vec![1u8, 2, 3]))?;
    ///
    /// let len = map.with(&AnyKey::new(7u32), |bytes: &Vec<u8>| bytes.len())?;
    /// assert_eq!(len, Some(3));
    /// # Ok::<(), MapError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns `MapError::ValueTypeMismatch` if `T` is not the value type
    /// - Returns `MapError::LockError` if the internal lock cannot be acquired
    pub fn with<T: Any, F, R>(&self, key: &AnyKey, f: F) -> Result<Option<R>, MapError>
    where
        F: FnOnce(&T) -> R,
    {
        if !self.val_type.is::<T>() {
            return Err(MapError::ValueTypeMismatch {
                expected: self.val_type,
                found: TypeDescriptor::of::<T>(),
            });
        }
        let entries = self.lock()?;
        Ok(entries.get(key).and_then(|value| value.downcast_ref::<T>()).map(f))
    }

    /// Returns true if the map holds an entry for `key`
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn contains(&self, key: &AnyKey) -> Result<bool, MapError> {
        let entries = self.lock()?;
        Ok(entries.contains_key(key))
    }

    /// Removes `key`, returning the value it held
    ///
    /// A key of the wrong type is simply not present.
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn remove(&self, key: &AnyKey) -> Result<Option<AnyValue>, MapError> {
        let mut entries = self.lock()?;
        Ok(entries.remove(key))
    }

    /// Removes every entry
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn clear(&self) -> Result<(), MapError> {
        let mut entries = self.lock()?;
        log::trace!("clearing {} entries", entries.len());
        entries.clear();
        Ok(())
    }

    /// Returns the number of entries in the map
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn len(&self) -> Result<usize, MapError> {
        let entries = self.lock()?;
        Ok(entries.len())
    }

    /// Returns true if the map contains no entries
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn is_empty(&self) -> Result<bool, MapError> {
        let entries = self.lock()?;
        Ok(entries.is_empty())
    }

    pub fn key_type(&self) -> TypeDescriptor {
        self.key_type
    }

    pub fn val_type(&self) -> TypeDescriptor {
        self.val_type
    }

    /// Returns a snapshot of all keys
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn keys(&self) -> Result<Vec<AnyKey>, MapError> {
        let entries = self.lock()?;
        Ok(entries.keys().cloned().collect())
    }

    /// Returns a snapshot of all values
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn vals(&self) -> Result<Vec<AnyValue>, MapError> {
        let entries = self.lock()?;
        Ok(entries.values().cloned().collect())
    }

    /// Returns a snapshot of all entries as a plain `HashMap`
    ///
    /// # Errors
    ///
    /// Returns `MapError::LockError` if the internal lock cannot be acquired.
    pub fn to_map(&self) -> Result<HashMap<AnyKey, AnyValue>, MapError> {
        let entries = self.lock()?;
        Ok(entries.clone())
    }
}

impl fmt::Debug for ConcurrentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentMap")
            .field("key_type", &self.key_type)
            .field("val_type", &self.val_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ConcurrentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConcurrentMap<{}, {}>{{", self.key_type, self.val_type)?;
        let pairs = match self.to_map() {
            Ok(pairs) => pairs,
            Err(_) => return f.write_str("<poisoned>}"),
        };
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}
