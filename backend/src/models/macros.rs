/// Defines a newtype ID wrapper around an integer scalar (`i32` or `i16`)
/// and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)
/// - `Display`
/// - `From<$inner> for $name` and `From<$name> for $inner`
/// - an [`EntityId`](crate::models::EntityId) implementation
///
/// Usage:
///   define_id_type!(i32, DoctorId);
#[macro_export]
macro_rules! define_id_type {
    ($inner:ty, $name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }

        impl $crate::models::EntityId for $name {
            const UNSAVED: Self = $name(0);

            fn from_sequence(value: i64) -> Option<Self> {
                <$inner>::try_from(value).ok().map($name)
            }

            fn as_i64(self) -> i64 {
                self.0 as i64
            }

            fn parse(raw: &str) -> Option<Self> {
                raw.trim().parse::<$inner>().ok().map($name)
            }
        }
    };
}

/// Implements [`Entity`](crate::models::Entity) for a struct with an `id` field.
///
/// The `audited` form also stamps `created_at` / `updated_at`; the `created`
/// form only stamps `created_at`.
#[macro_export]
macro_rules! impl_entity {
    ($entity:ty, $id:ty, $name:literal) => {
        impl $crate::models::Entity for $entity {
            type Id = $id;
            const NAME: &'static str = $name;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }
        }
    };
    ($entity:ty, $id:ty, $name:literal, created) => {
        impl $crate::models::Entity for $entity {
            type Id = $id;
            const NAME: &'static str = $name;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }

            fn stamp_created(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                self.created_at = now;
            }
        }
    };
    ($entity:ty, $id:ty, $name:literal, audited) => {
        impl $crate::models::Entity for $entity {
            type Id = $id;
            const NAME: &'static str = $name;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }

            fn stamp_created(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                self.created_at = now;
                self.updated_at = None;
            }

            fn stamp_updated(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                self.updated_at = Some(now);
            }
        }
    };
}
