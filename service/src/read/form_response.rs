//! [`FormResponse`] read model definition.

use crate::domain::{FormResponse, InvestmentListing, TourismPackage};

/// [`FormResponse`] along with the records it refers to.
#[derive(Clone, Debug)]
pub struct Resolved {
    /// The [`FormResponse`] itself.
    pub response: FormResponse,

    /// Referred [`InvestmentListing`], if it exists.
    pub property: Option<InvestmentListing>,

    /// Referred [`TourismPackage`], if it exists.
    pub package: Option<TourismPackage>,
}

pub mod list {
    //! [`FormResponse`]s list definitions.

    use derive_more::{From, Into};

    use crate::domain::form_response;
    #[cfg(doc)]
    use crate::domain::FormResponse;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`form_response::Kind`] to select only.
        pub kind: Option<form_response::Kind>,

        /// [`form_response::Status`] to select only.
        pub status: Option<form_response::Status>,
    }

    /// Selector of a [`FormResponse`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Selector {
        /// [`Filter`] to apply.
        pub filter: Filter,

        /// Maximum number of [`FormResponse`]s to select, if limited.
        pub limit: Option<usize>,
    }

    /// Total count of [`FormResponse`]s.
    #[derive(
        Clone, Copy, Debug, Default, Eq, From, Hash, Into, PartialEq,
    )]
    pub struct TotalCount(u64);
}
