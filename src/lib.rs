//! # sovran-containers
//!
//! Thread-safe containers for code that only learns its types at runtime.
//!
//! Two containers are provided:
//!
//! - [`ConcurrentMap`] fixes one key type and one value type when it is
//!   created, as [`TypeDescriptor`]s, and refuses any `put` that does not
//!   match them.
//! - [`HashSet`] holds heterogeneous, hashable elements and supports set
//!   equality, snapshots and set algebra.
//!
//! Keys and set elements travel as [`AnyKey`], values as [`AnyValue`]. Both
//! remember their concrete type, so a container can validate them without
//! knowing anything at compile time.
//!
//! ## Key Features
//!
//! - **Type-checked**: a map never holds a key or value of the wrong type
//! - **Thread-safe**: built on `Arc<Mutex<_>>`; clones share the same contents
//! - **Explicit absence**: "no previous value" is `None`, never a zero value
//! - **Snapshots**: `keys`, `vals`, `to_map` and `elements` copy out under the lock
//! - **Capability checks**: [`is_map`] and [`is_set`] recognise containers behind `&dyn Any`
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_containers::{AnyKey, AnyValue, ConcurrentMap, MapError, TypeDescriptor};
//!
//! fn main() -> Result<(), MapError> {
//!     let map = ConcurrentMap::new(TypeDescriptor::of::<i64>(), TypeDescriptor::of::<i64>());
//!
//!     assert_eq!(map.put(AnyKey::new(1i64), AnyValue::new(100i64))?, None);
//!     assert_eq!(
//!         map.put(AnyKey::new(1i64), AnyValue::new(200i64))?,
//!         Some(AnyValue::new(100i64))
//!     );
//!
//!     assert_eq!(map.get_as::<i64>(&AnyKey::new(1i64))?, Some(200));
//!     assert_eq!(map.len()?, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_containers::{AnyKey, AnyValue, ConcurrentMap, MapError, TypeDescriptor};
//!
//! let map = ConcurrentMap::new(TypeDescriptor::of::<i64>(), TypeDescriptor::of::<String>());
//!
//! match map.put(AnyKey::new(1i64), AnyValue::new(5i64)) {
//!     Ok(_) => println!("stored"),
//!     Err(MapError::KeyTypeMismatch { expected, found }) => {
//!         println!("key should be {}, not {}", expected, found)
//!     }
//!     Err(MapError::ValueTypeMismatch { expected, found }) => {
//!         println!("value should be {}, not {}", expected, found)
//!     }
//!     Err(MapError::LockError) => println!("Failed to acquire lock"),
//! }
//! ```
//!
//! ### Sets of Mixed Elements
//!
//! ```rust
//! use sovran_containers::{set_ops, AnyKey, HashSet, MapError};
//!
//! fn main() -> Result<(), MapError> {
//!     let a = HashSet::new();
//!     a.add(AnyKey::new("x"))?;
//!     a.add(AnyKey::new(7i64))?;
//!
//!     let b = HashSet::new();
//!     b.add(AnyKey::new(7i64))?;
//!
//!     assert!(set_ops::is_superset(&a, &b)?);
//!     let only_a = set_ops::difference(&a, &b)?;
//!     assert!(only_a.contains(&AnyKey::new("x"))?);
//!     println!("{}", only_a);
//!
//!     Ok(())
//! }
//! ```

mod any_value;
mod descriptor;
mod error;
mod float_key;
mod map;
mod set;
pub mod set_ops;
mod traits;

pub use any_value::{AnyKey, AnyValue};
pub use descriptor::{Described, TypeDescriptor};
pub use error::MapError;
pub use float_key::FloatKey;
pub use map::ConcurrentMap;
pub use set::HashSet;
pub use traits::{as_map, as_set, is_map, is_set, Map, Set};
