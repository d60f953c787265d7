//! [`Query`] collection related to the multiple [`Booking`]s.

use common::operations::By;

use crate::{domain::Booking, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Booking`]s, newest first.
pub type List =
    DatabaseQuery<By<Vec<Booking>, read::booking::list::Selector>>;

/// Queries total count of [`Booking`]s passing a filter.
pub type TotalCount = DatabaseQuery<
    By<read::booking::list::TotalCount, read::booking::list::Filter>,
>;
