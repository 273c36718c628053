use crate::descriptor::{Described, TypeDescriptor};
use std::any::Any;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

trait ErasedValue: Any + Send + Sync + Debug {
    fn as_any(&self) -> &dyn Any;
    fn eq_erased(&self, other: &dyn Any) -> bool;
}

impl<T> ErasedValue for T
where
    T: Any + Send + Sync + PartialEq + Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().map_or(false, |other| self == other)
    }
}

trait ErasedKey: ErasedValue {
    fn hash_erased(&self, state: &mut dyn Hasher);
}

impl<T> ErasedKey for T
where
    T: Any + Send + Sync + Eq + Hash + Debug,
{
    fn hash_erased(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// A type-erased value that remembers its concrete type
///
/// This is what a [`ConcurrentMap`](crate::ConcurrentMap) stores and hands
/// back. Any `Send + Sync + PartialEq + Debug` type can be wrapped, including
/// floats. Two values are equal when they have the same concrete type and
/// compare equal as that type. Cloning is cheap and shares the payload.
///
/// Equality is the payload's own `PartialEq`, so a stored `f64::NAN` never
/// compares equal to anything, itself included: reading it back succeeds but
/// `get(k) == Some(AnyValue::new(f64::NAN))` is false.
#[derive(Clone)]
pub struct AnyValue {
    descriptor: TypeDescriptor,
    value: Arc<dyn ErasedValue>,
}

impl AnyValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync + PartialEq + Debug,
    {
        Self {
            descriptor: TypeDescriptor::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Check if the contained value is of type T
    pub fn is<T: Any>(&self) -> bool {
        self.descriptor.is::<T>()
    }

    /// Get a reference to the contained value if it is of type T
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }

    /// Clone the contained value out if it is of type T
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl Described for AnyValue {
    fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.value.eq_erased(other.value.as_any())
    }
}

impl Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.value, f)
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.value, f)
    }
}

/// A type-erased, hashable value
///
/// Used as the key of a [`ConcurrentMap`](crate::ConcurrentMap) and as the
/// element of a [`HashSet`](crate::HashSet). Equality is value equality on the
/// concrete type, so `(1i64, "a".to_string())` wrapped twice gives two equal
/// keys, while `1i64` and `1i32` never compare equal.
#[derive(Clone)]
pub struct AnyKey {
    descriptor: TypeDescriptor,
    value: Arc<dyn ErasedKey>,
}

impl AnyKey {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync + Eq + Hash + Debug,
    {
        Self {
            descriptor: TypeDescriptor::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Check if the contained key is of type T
    pub fn is<T: Any>(&self) -> bool {
        self.descriptor.is::<T>()
    }

    /// Get a reference to the contained key if it is of type T
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }

    /// Clone the contained key out if it is of type T
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl Described for AnyKey {
    fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }
}

impl PartialEq for AnyKey {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.value.eq_erased(other.value.as_any())
    }
}

impl Eq for AnyKey {}

impl Hash for AnyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
        self.value.hash_erased(state);
    }
}

impl Debug for AnyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.value, f)
    }
}

impl fmt::Display for AnyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.value, f)
    }
}
