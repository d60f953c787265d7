//! [`InvestmentListing`] read model definition.
//!
//! [`InvestmentListing`]: crate::domain::InvestmentListing

pub mod list {
    //! [`InvestmentListing`]s list definitions.

    use derive_more::{From, Into};

    use crate::domain::investment_listing;
    #[cfg(doc)]
    use crate::domain::InvestmentListing;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`investment_listing::Status`] to select only.
        pub status: Option<investment_listing::Status>,
    }

    /// Selector of an [`InvestmentListing`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Selector {
        /// [`Filter`] to apply.
        pub filter: Filter,

        /// Maximum number of [`InvestmentListing`]s to select, if limited.
        pub limit: Option<usize>,
    }

    /// Total count of [`InvestmentListing`]s.
    #[derive(
        Clone, Copy, Debug, Default, Eq, From, Hash, Into, PartialEq,
    )]
    pub struct TotalCount(u64);
}
