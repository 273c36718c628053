use std::fmt;
use std::hash::{Hash, Hasher};

/// An `f64` that can be used as a map key or set element
///
/// Raw `f64` is neither `Eq` nor `Hash`, so it cannot be wrapped in an
/// [`AnyKey`](crate::AnyKey). `FloatKey` compares and hashes by bit pattern,
/// with `-0.0` folded into `0.0` and every NaN folded into one canonical NaN.
/// As a key, NaN is therefore equal to itself.
///
/// # Examples
///
/// ```
/// use sovran_containers::{AnyKey, AnyValue, ConcurrentMap, FloatKey, MapError, TypeDescriptor};
///
/// let map = ConcurrentMap::new(TypeDescriptor::of::<FloatKey>(), TypeDescriptor::of::<f64>());
/// map.put(AnyKey::new(FloatKey::new(0.5)), AnyValue::new(2.0f64))?;
///
/// assert_eq!(map.get_as::<f64>(&AnyKey::new(FloatKey::from(0.5)))?, Some(2.0));
/// # Ok::<(), MapError>(())
/// ```
#[derive(Clone, Copy, Default)]
pub struct FloatKey(f64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The wrapped float, exactly as it was given
    pub fn get(self) -> f64 {
        self.0
    }

    fn canonical_bits(self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl From<f64> for FloatKey {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<FloatKey> for f64 {
    fn from(key: FloatKey) -> Self {
        key.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl fmt::Debug for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnyKey;

    #[test]
    fn test_zero_and_nan_fold() {
        assert_eq!(FloatKey::new(0.0), FloatKey::new(-0.0));
        assert_eq!(FloatKey::new(f64::NAN), FloatKey::new(-f64::NAN));
        assert_eq!(AnyKey::new(FloatKey::new(f64::NAN)), AnyKey::new(FloatKey::new(f64::NAN)));
        assert_ne!(FloatKey::new(1.0), FloatKey::new(1.0 + f64::EPSILON));
    }

    #[test]
    fn test_round_trips_value() {
        let key = FloatKey::from(-3.25);
        assert_eq!(key.get(), -3.25);
        assert_eq!(f64::from(key), -3.25);
        assert_eq!(format!("{:?}", key), "-3.25");
        assert_eq!(key.to_string(), "-3.25");
    }
}
