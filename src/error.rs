use crate::descriptor::TypeDescriptor;
use std::fmt;

/// Errors that can occur when using the containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Failed to acquire lock on the container
    LockError,
    /// A key did not match the key type the map was created with
    KeyTypeMismatch {
        expected: TypeDescriptor,
        found: TypeDescriptor,
    },
    /// A value did not match the value type the map was created with
    ValueTypeMismatch {
        expected: TypeDescriptor,
        found: TypeDescriptor,
    },
}

impl MapError {
    /// True for either flavour of type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            MapError::KeyTypeMismatch { .. } | MapError::ValueTypeMismatch { .. }
        )
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapError::LockError => write!(f, "Failed to acquire lock"),
            MapError::KeyTypeMismatch { expected, found } => {
                write!(f, "Key type mismatch: expected {}, found {}", expected, found)
            }
            MapError::ValueTypeMismatch { expected, found } => {
                write!(f, "Value type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for MapError {}
