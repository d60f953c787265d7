//! [`Query`] collection related to the multiple [`TourismPackage`]s.

use common::operations::By;

use crate::{domain::TourismPackage, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`TourismPackage`]s, newest first.
pub type List = DatabaseQuery<
    By<Vec<TourismPackage>, read::tourism_package::list::Selector>,
>;

/// Queries total count of [`TourismPackage`]s.
pub type TotalCount =
    DatabaseQuery<By<read::tourism_package::list::TotalCount, ()>>;
