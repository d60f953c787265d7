//! [`Query`] collection related to a single [`TourismPackage`].

use common::operations::By;

use crate::domain::{tourism_package, TourismPackage};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`TourismPackage`] by its [`tourism_package::Id`].
pub type ById = DatabaseQuery<By<Option<TourismPackage>, tourism_package::Id>>;
