//! Typed Keys

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Integer primary key tagged with the record type it identifies.
pub struct TypedId<T>(i64, PhantomData<T>);

/// UUID primary key tagged with the record type it identifies.
pub struct TypedUuid<T>(Uuid, PhantomData<T>);

impl<T> TypedId<T> {
    pub const fn from_i64(id: i64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn into_i64(self) -> i64 {
        self.0
    }
}

impl<T> TypedUuid<T> {
    /// Generate a fresh, time-ordered key.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl<T> Default for TypedUuid<T> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! typed_key_impls {
    ($key:ident, $inner:ty) => {
        impl<T> Clone for $key<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $key<T> {}

        impl<T> Debug for $key<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                Debug::fmt(&self.0, f)
            }
        }

        impl<T> Display for $key<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                Display::fmt(&self.0, f)
            }
        }

        impl<T> PartialEq for $key<T> {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<T> Eq for $key<T> {}

        impl<T> Hash for $key<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl<T> PartialOrd for $key<T> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<T> Ord for $key<T> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl<T> From<$inner> for $key<T> {
            fn from(value: $inner) -> Self {
                Self(value, PhantomData)
            }
        }

        impl<T> From<$key<T>> for $inner {
            fn from(value: $key<T>) -> Self {
                value.0
            }
        }

        impl<T> Serialize for $key<T> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de, T> Deserialize<'de> for $key<T> {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$inner>::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

typed_key_impls!(TypedId, i64);
typed_key_impls!(TypedUuid, Uuid);

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn typed_id_round_trips_through_i64() {
        let id = TypedId::<Widget>::from_i64(42);

        assert_eq!(i64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn typed_id_serializes_transparently() -> Result<(), serde_json::Error> {
        let id = TypedId::<Widget>::from_i64(7);

        assert_eq!(serde_json::to_string(&id)?, "7");
        assert_eq!(serde_json::from_str::<TypedId<Widget>>("7")?, id);

        Ok(())
    }

    #[test]
    fn typed_uuids_are_unique() {
        let first = TypedUuid::<Widget>::new();
        let second = TypedUuid::<Widget>::new();

        assert_ne!(first, second, "fresh keys should never collide");
    }
}
