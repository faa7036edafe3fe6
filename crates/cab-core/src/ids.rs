//! Strongly typed identifier wrappers.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The identifier that follows `self`, wrapping at the integer limit.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0.wrapping_add(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of an animated vehicle.  The animator keys its runs by this.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Identity of one pickup/drop-off trip.  A reset starts a new trip with
    /// the next id, so late replies tagged with the old id can be told apart.
    pub struct TripId(u32);
}
