//! [`TourismPackage`] read model definition.
//!
//! [`TourismPackage`]: crate::domain::TourismPackage

pub mod list {
    //! [`TourismPackage`]s list definitions.

    use derive_more::{From, Into};

    #[cfg(doc)]
    use crate::domain::TourismPackage;

    /// Selector of a [`TourismPackage`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Selector {
        /// Maximum number of [`TourismPackage`]s to select, if limited.
        pub limit: Option<usize>,
    }

    /// Total count of [`TourismPackage`]s.
    #[derive(
        Clone, Copy, Debug, Default, Eq, From, Hash, Into, PartialEq,
    )]
    pub struct TotalCount(u64);
}
