//! [`Query`] collection related to a single [`InvestmentListing`].

use common::operations::By;

use crate::domain::{investment_listing, InvestmentListing};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`InvestmentListing`] by its [`investment_listing::Id`].
pub type ById =
    DatabaseQuery<By<Option<InvestmentListing>, investment_listing::Id>>;
