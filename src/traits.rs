use crate::any_value::{AnyKey, AnyValue};
use crate::descriptor::TypeDescriptor;
use crate::error::MapError;
use crate::map::ConcurrentMap;
use crate::set::HashSet;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The public contract of a runtime-typed concurrent map
///
/// Object safe, so generic code can hold a `&dyn Map` without knowing the
/// concrete container.
pub trait Map: Send + Sync + fmt::Display {
    fn put(&self, key: AnyKey, value: AnyValue) -> Result<Option<AnyValue>, MapError>;
    fn get(&self, key: &AnyKey) -> Result<Option<AnyValue>, MapError>;
    fn contains(&self, key: &AnyKey) -> Result<bool, MapError>;
    fn remove(&self, key: &AnyKey) -> Result<Option<AnyValue>, MapError>;
    fn clear(&self) -> Result<(), MapError>;
    fn len(&self) -> Result<usize, MapError>;
    fn key_type(&self) -> TypeDescriptor;
    fn val_type(&self) -> TypeDescriptor;
    fn keys(&self) -> Result<Vec<AnyKey>, MapError>;
    fn vals(&self) -> Result<Vec<AnyValue>, MapError>;
    fn to_map(&self) -> Result<HashMap<AnyKey, AnyValue>, MapError>;

    fn is_empty(&self) -> Result<bool, MapError> {
        Ok(self.len()? == 0)
    }
}

/// The public contract of a concurrent set of heterogeneous elements
pub trait Set: Send + Sync + fmt::Display {
    fn add(&self, element: AnyKey) -> Result<bool, MapError>;
    fn remove(&self, element: &AnyKey) -> Result<bool, MapError>;
    fn clear(&self) -> Result<(), MapError>;
    fn contains(&self, element: &AnyKey) -> Result<bool, MapError>;
    fn len(&self) -> Result<usize, MapError>;
    fn elements(&self) -> Result<Vec<AnyKey>, MapError>;
    fn same(&self, other: &dyn Set) -> Result<bool, MapError>;

    fn is_empty(&self) -> Result<bool, MapError> {
        Ok(self.len()? == 0)
    }
}

impl Map for ConcurrentMap {
    fn put(&self, key: AnyKey, value: AnyValue) -> Result<Option<AnyValue>, MapError> {
        ConcurrentMap::put(self, key, value)
    }

    fn get(&self, key: &AnyKey) -> Result<Option<AnyValue>, MapError> {
        ConcurrentMap::get(self, key)
    }

    fn contains(&self, key: &AnyKey) -> Result<bool, MapError> {
        ConcurrentMap::contains(self, key)
    }

    fn remove(&self, key: &AnyKey) -> Result<Option<AnyValue>, MapError> {
        ConcurrentMap::remove(self, key)
    }

    fn clear(&self) -> Result<(), MapError> {
        ConcurrentMap::clear(self)
    }

    fn len(&self) -> Result<usize, MapError> {
        ConcurrentMap::len(self)
    }

    fn is_empty(&self) -> Result<bool, MapError> {
        ConcurrentMap::is_empty(self)
    }

    fn key_type(&self) -> TypeDescriptor {
        ConcurrentMap::key_type(self)
    }

    fn val_type(&self) -> TypeDescriptor {
        ConcurrentMap::val_type(self)
    }

    fn keys(&self) -> Result<Vec<AnyKey>, MapError> {
        ConcurrentMap::keys(self)
    }

    fn vals(&self) -> Result<Vec<AnyValue>, MapError> {
        ConcurrentMap::vals(self)
    }

    fn to_map(&self) -> Result<HashMap<AnyKey, AnyValue>, MapError> {
        ConcurrentMap::to_map(self)
    }
}

impl Set for HashSet {
    fn add(&self, element: AnyKey) -> Result<bool, MapError> {
        HashSet::add(self, element)
    }

    fn remove(&self, element: &AnyKey) -> Result<bool, MapError> {
        HashSet::remove(self, element)
    }

    fn clear(&self) -> Result<(), MapError> {
        HashSet::clear(self)
    }

    fn contains(&self, element: &AnyKey) -> Result<bool, MapError> {
        HashSet::contains(self, element)
    }

    fn len(&self) -> Result<usize, MapError> {
        HashSet::len(self)
    }

    fn is_empty(&self) -> Result<bool, MapError> {
        HashSet::is_empty(self)
    }

    fn elements(&self) -> Result<Vec<AnyKey>, MapError> {
        HashSet::elements(self)
    }

    fn same(&self, other: &dyn Set) -> Result<bool, MapError> {
        HashSet::same(self, other)
    }
}

/// Views an opaque value as a [`Map`], if it is one
///
/// Recognises a `ConcurrentMap`, an `Arc<ConcurrentMap>`, and boxed or
/// shared `dyn Map` trait objects.
pub fn as_map(value: &dyn Any) -> Option<&dyn Map> {
    if let Some(map) = value.downcast_ref::<ConcurrentMap>() {
        return Some(map as &dyn Map);
    }
    if let Some(map) = value.downcast_ref::<Arc<ConcurrentMap>>() {
        return Some(&**map as &dyn Map);
    }
    if let Some(map) = value.downcast_ref::<Box<dyn Map>>() {
        return Some(&**map);
    }
    if let Some(map) = value.downcast_ref::<Arc<dyn Map>>() {
        return Some(&**map);
    }
    None
}

/// Views an opaque value as a [`Set`], if it is one
///
/// Recognises a `HashSet`, an `Arc<HashSet>`, and boxed or shared `dyn Set`
/// trait objects.
pub fn as_set(value: &dyn Any) -> Option<&dyn Set> {
    if let Some(set) = value.downcast_ref::<HashSet>() {
        return Some(set as &dyn Set);
    }
    if let Some(set) = value.downcast_ref::<Arc<HashSet>>() {
        return Some(&**set as &dyn Set);
    }
    if let Some(set) = value.downcast_ref::<Box<dyn Set>>() {
        return Some(&**set);
    }
    if let Some(set) = value.downcast_ref::<Arc<dyn Set>>() {
        return Some(&**set);
    }
    None
}

/// Returns true if `value` supports the full [`Map`] contract
///
/// # Examples
///
/// ```
/// use sovran_containers::{is_map, is_set, ConcurrentMap, HashSet, TypeDescriptor};
///
/// let map = ConcurrentMap::new(TypeDescriptor::of::<u8>(), TypeDescriptor::of::<u8>());
/// assert!(is_map(&map));
/// assert!(!is_set(&map));
/// assert!(!is_map(&HashSet::new()));
/// assert!(!is_map(&42));
/// ```
pub fn is_map(value: &dyn Any) -> bool {
    as_map(value).is_some()
}

/// Returns true if `value` supports the full [`Set`] contract
pub fn is_set(value: &dyn Any) -> bool {
    as_set(value).is_some()
}
