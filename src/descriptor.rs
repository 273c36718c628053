use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A runtime handle naming a concrete type
///
/// Descriptors are what a [`ConcurrentMap`](crate::ConcurrentMap) is tagged
/// with at construction. Two descriptors compare equal exactly when they name
/// the same type; the name is carried only for diagnostics.
///
/// A key descriptor must name an `Eq + Hash` type. Raw `f64` is not one, so a
/// map keyed by `of::<f64>()` would refuse every key; describe float keys as
/// [`FloatKey`](crate::FloatKey) instead.
///
/// # Examples
///
/// ```
/// use sovran_containers::{AnyValue, TypeDescriptor};
///
/// let int64 = TypeDescriptor::of::<i64>();
/// assert_eq!(int64, TypeDescriptor::of_val(&7i64));
/// assert!(int64.matches(&AnyValue::new(1i64)));
/// assert!(!int64.matches(&AnyValue::new(1i32)));
/// ```
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Describes the type `T`
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Describes the type of `value`
    pub fn of_val<T: ?Sized + Any>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// The `TypeId` this descriptor compares by
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name, as given by `std::any::type_name`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this descriptor names `T`
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Checks whether the dynamic type of `value` is the described type
    pub fn matches<D: Described + ?Sized>(&self, value: &D) -> bool {
        self.id == value.descriptor().id
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Anything that knows the runtime type it carries
pub trait Described {
    fn descriptor(&self) -> TypeDescriptor;
}

impl Described for TypeDescriptor {
    fn descriptor(&self) -> TypeDescriptor {
        *self
    }
}
