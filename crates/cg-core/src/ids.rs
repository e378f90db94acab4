//! Typed positions into the segment and lot lists.
//!
//! The inner integer is `pub`; `index()` turns an id back into a `Vec`
//! position.

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of a road segment (directional road, intersection or access
    /// road) in its `RoadNetwork`.
    SegmentId
}

typed_id! {
    /// Position of a building or park lot in the generated lot list.
    LotId
}
