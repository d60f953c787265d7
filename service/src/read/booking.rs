//! [`Booking`] read model definition.
//!
//! [`Booking`]: crate::domain::Booking

pub mod list {
    //! [`Booking`]s list definitions.

    use derive_more::{From, Into};

    use crate::domain::booking;
    #[cfg(doc)]
    use crate::domain::Booking;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`booking::Status`] to select only.
        pub status: Option<booking::Status>,
    }

    /// Selector of a [`Booking`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Selector {
        /// [`Filter`] to apply.
        pub filter: Filter,

        /// Maximum number of [`Booking`]s to select, if limited.
        pub limit: Option<usize>,
    }

    /// Total count of [`Booking`]s.
    #[derive(
        Clone, Copy, Debug, Default, Eq, From, Hash, Into, PartialEq,
    )]
    pub struct TotalCount(u64);
}
