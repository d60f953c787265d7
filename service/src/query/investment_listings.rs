//! [`Query`] collection related to the multiple [`InvestmentListing`]s.

use common::operations::By;

use crate::{domain::InvestmentListing, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`InvestmentListing`]s, newest first.
pub type List = DatabaseQuery<
    By<Vec<InvestmentListing>, read::investment_listing::list::Selector>,
>;

/// Queries total count of [`InvestmentListing`]s passing a filter.
pub type TotalCount = DatabaseQuery<
    By<
        read::investment_listing::list::TotalCount,
        read::investment_listing::list::Filter,
    >,
>;
