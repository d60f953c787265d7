//! In-memory [`Database`] implementation.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use common::{
    operations::{By, Commit, Delete, Insert, Lock, Select, Transact, Update},
    DateTime,
};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracerr::Traced;

use crate::{
    domain::{
        booking, form_response, investment_listing, tourism_package, Booking,
        FormResponse, InvestmentListing, TourismPackage,
    },
    infra::database::{self, Database},
    read,
};

/// In-memory [`Database`], losing all its data once dropped.
///
/// [`Transact`]ed clients serialize with each other once any record is
/// [`Lock`]ed, until the transaction is [`Commit`]ted or dropped. Writes are
/// applied immediately.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored [`Collections`].
    collections: Arc<RwLock<Collections>>,

    /// Lock serializing writing transactions.
    writer: Arc<Mutex<()>>,

    /// Guard of the [`Memory::writer`] lock held by this transaction, if
    /// this client is a transactional one.
    tx: Option<Arc<Mutex<Option<OwnedMutexGuard<()>>>>>,
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records stored in a [`Memory`] database, in the order of insertion.
#[derive(Debug, Default)]
pub struct Collections {
    /// Stored [`TourismPackage`]s.
    tourism_packages: Vec<TourismPackage>,

    /// Stored [`InvestmentListing`]s.
    investment_listings: Vec<InvestmentListing>,

    /// Stored [`Booking`]s.
    bookings: Vec<Booking>,

    /// Stored [`FormResponse`]s.
    form_responses: Vec<FormResponse>,
}

/// Record stored in a [`Memory`] database.
pub trait Record: Clone + Send + Sync + 'static {
    /// Type of this [`Record`] ID.
    type Id: Copy + Eq + Hash + Send + Sync + 'static;

    /// Type of this [`Record`]s list selector.
    type Selector: Send + 'static;

    /// Returns ID of this [`Record`].
    fn id(&self) -> Self::Id;

    /// Returns [`DateTime`] when this [`Record`] was created.
    fn created_at(&self) -> DateTime;

    /// Checks whether this [`Record`] passes the provided `selector`.
    fn matches(&self, selector: &Self::Selector) -> bool;

    /// Returns maximum number of [`Record`]s the `selector` allows.
    fn limit(selector: &Self::Selector) -> Option<usize>;

    /// Returns the collection of these [`Record`]s.
    fn collection(c: &Collections) -> &Vec<Self>;

    /// Returns the mutable collection of these [`Record`]s.
    fn collection_mut(c: &mut Collections) -> &mut Vec<Self>;
}

impl Record for TourismPackage {
    type Id = tourism_package::Id;
    type Selector = read::tourism_package::list::Selector;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn created_at(&self) -> DateTime {
        self.created_at.coerce()
    }

    fn matches(&self, _: &Self::Selector) -> bool {
        true
    }

    fn limit(selector: &Self::Selector) -> Option<usize> {
        selector.limit
    }

    fn collection(c: &Collections) -> &Vec<Self> {
        &c.tourism_packages
    }

    fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.tourism_packages
    }
}

impl Record for InvestmentListing {
    type Id = investment_listing::Id;
    type Selector = read::investment_listing::list::Selector;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn created_at(&self) -> DateTime {
        self.created_at.coerce()
    }

    fn matches(&self, selector: &Self::Selector) -> bool {
        selector.filter.status.map_or(true, |s| s == self.status)
    }

    fn limit(selector: &Self::Selector) -> Option<usize> {
        selector.limit
    }

    fn collection(c: &Collections) -> &Vec<Self> {
        &c.investment_listings
    }

    fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.investment_listings
    }
}

impl Record for Booking {
    type Id = booking::Id;
    type Selector = read::booking::list::Selector;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn created_at(&self) -> DateTime {
        self.created_at.coerce()
    }

    fn matches(&self, selector: &Self::Selector) -> bool {
        selector.filter.status.map_or(true, |s| s == self.status)
    }

    fn limit(selector: &Self::Selector) -> Option<usize> {
        selector.limit
    }

    fn collection(c: &Collections) -> &Vec<Self> {
        &c.bookings
    }

    fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.bookings
    }
}

impl Record for FormResponse {
    type Id = form_response::Id;
    type Selector = read::form_response::list::Selector;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn created_at(&self) -> DateTime {
        self.created_at.coerce()
    }

    fn matches(&self, selector: &Self::Selector) -> bool {
        let read::form_response::list::Filter { kind, status } =
            selector.filter;
        kind.map_or(true, |k| k == self.kind)
            && status.map_or(true, |s| s == self.status)
    }

    fn limit(selector: &Self::Selector) -> Option<usize> {
        selector.limit
    }

    fn collection(c: &Collections) -> &Vec<Self> {
        &c.form_responses
    }

    fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.form_responses
    }
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        if self.tx.is_some() {
            return Ok(self.clone());
        }
        Ok(Self {
            collections: Arc::clone(&self.collections),
            writer: Arc::clone(&self.writer),
            tx: Some(Arc::new(Mutex::new(None))),
        })
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        if let Some(tx) = &self.tx {
            drop(tx.lock().await.take());
        }
        Ok(())
    }
}

impl<E: Record> Database<Lock<By<E, E::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(tx) = &self.tx else {
            // Nothing to hold the lock for outside a transaction.
            return Ok(());
        };

        let mut guard = tx.lock().await;
        if guard.is_none() {
            *guard = Some(Arc::clone(&self.writer).lock_owned().await);
        }
        Ok(())
    }
}

impl<E: Record> Database<Select<By<Option<E>, E::Id>>> for Memory {
    type Ok = Option<E>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<E>, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(E::collection(&*self.collections.read().await)
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }
}

impl<E, IDs> Database<Select<By<HashMap<E::Id, E>, IDs>>> for Memory
where
    E: Record,
    IDs: AsRef<[E::Id]> + Send,
{
    type Ok = HashMap<E::Id, E>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<E::Id, E>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        let ids = ids.as_ref();
        Ok(E::collection(&*self.collections.read().await)
            .iter()
            .filter(|r| ids.contains(&r.id()))
            .map(|r| (r.id(), r.clone()))
            .collect())
    }
}

impl<E: Record> Database<Select<By<Vec<E>, E::Selector>>> for Memory {
    type Ok = Vec<E>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<E>, E::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        // Latest insertions go first among the records created at the same
        // time.
        let mut records = E::collection(&*self.collections.read().await)
            .iter()
            .rev()
            .filter(|r| r.matches(&selector))
            .cloned()
            .collect::<Vec<_>>();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        if let Some(limit) = E::limit(&selector) {
            records.truncate(limit);
        }
        Ok(records)
    }
}

impl<E: Record> Database<Insert<E>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<E>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut collections = self.collections.write().await;
        let collection = E::collection_mut(&mut collections);
        if let Some(existing) =
            collection.iter_mut().find(|r| r.id() == record.id())
        {
            *existing = record;
        } else {
            collection.push(record);
        }
        Ok(())
    }
}

impl<E: Record> Database<Update<E>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(record): Update<E>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(record)).await
    }
}

impl<E: Record> Database<Delete<By<E, E::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        E::collection_mut(&mut *self.collections.write().await)
            .retain(|r| r.id() != id);
        Ok(())
    }
}

/// Counts the [`Record`]s of the provided type passing the `selector`.
async fn count<E: Record>(db: &Memory, selector: &E::Selector) -> u64 {
    let collections = db.collections.read().await;
    E::collection(&collections)
        .iter()
        .filter(|r| r.matches(selector))
        .count() as u64
}

impl Database<Select<By<read::tourism_package::list::TotalCount, ()>>>
    for Memory
{
    type Ok = read::tourism_package::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::tourism_package::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = read::tourism_package::list::Selector::default();
        Ok(count::<TourismPackage>(self, &selector).await.into())
    }
}

impl
    Database<
        Select<
            By<
                read::investment_listing::list::TotalCount,
                read::investment_listing::list::Filter,
            >,
        >,
    > for Memory
{
    type Ok = read::investment_listing::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::investment_listing::list::TotalCount,
                read::investment_listing::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = read::investment_listing::list::Selector {
            filter: by.into_inner(),
            limit: None,
        };
        Ok(count::<InvestmentListing>(self, &selector).await.into())
    }
}

impl
    Database<
        Select<
            By<read::booking::list::TotalCount, read::booking::list::Filter>,
        >,
    > for Memory
{
    type Ok = read::booking::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::list::TotalCount, read::booking::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = read::booking::list::Selector {
            filter: by.into_inner(),
            limit: None,
        };
        Ok(count::<Booking>(self, &selector).await.into())
    }
}

impl
    Database<
        Select<
            By<
                read::form_response::list::TotalCount,
                read::form_response::list::Filter,
            >,
        >,
    > for Memory
{
    type Ok = read::form_response::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::form_response::list::TotalCount,
                read::form_response::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = read::form_response::list::Selector {
            filter: by.into_inner(),
            limit: None,
        };
        Ok(count::<FormResponse>(self, &selector).await.into())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Commit, Delete, Insert, Lock, Select, Transact},
        DateTime, Price,
    };

    use crate::{
        domain::{investment_listing, InvestmentListing},
        infra::Database as _,
        read::investment_listing::list,
    };

    use super::Memory;

    fn listing(
        title: &str,
        status: investment_listing::Status,
    ) -> InvestmentListing {
        InvestmentListing {
            id: investment_listing::Id::new(),
            title: investment_listing::Title::new(title).unwrap(),
            description: None,
            price: Price::ZERO,
            location: None,
            property_type: None,
            area_sqft: None,
            status,
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn lists_newest_first_with_filter_and_limit() {
        use investment_listing::Status as S;

        let db = Memory::new();
        for (title, status) in [
            ("first", S::Available),
            ("second", S::Sold),
            ("third", S::Available),
        ] {
            db.execute(Insert(listing(title, status))).await.unwrap();
        }

        let all = db
            .execute(Select(By::<Vec<InvestmentListing>, _>::new(
                list::Selector::default(),
            )))
            .await
            .unwrap();
        let titles =
            all.iter().map(|l| l.title.to_string()).collect::<Vec<_>>();
        assert_eq!(titles, ["third", "second", "first"]);

        let available = db
            .execute(Select(By::<Vec<InvestmentListing>, _>::new(
                list::Selector {
                    filter: list::Filter {
                        status: Some(S::Available),
                    },
                    limit: Some(1),
                },
            )))
            .await
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].title.as_ref(), "third");

        let sold = db
            .execute(Select(By::<list::TotalCount, _>::new(list::Filter {
                status: Some(S::Sold),
            })))
            .await
            .unwrap();
        assert_eq!(u64::from(sold), 1);
    }

    #[tokio::test]
    async fn inserts_replace_by_id_and_deletes_remove() {
        let db = Memory::new();
        let mut l = listing("villa", investment_listing::Status::Available);
        db.execute(Insert(l.clone())).await.unwrap();

        l.status = investment_listing::Status::Reserved;
        db.execute(Insert(l.clone())).await.unwrap();

        let stored = db
            .execute(Select(By::<Option<InvestmentListing>, _>::new(l.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, investment_listing::Status::Reserved);

        db.execute(Delete(By::<InvestmentListing, _>::new(l.id)))
            .await
            .unwrap();
        let gone = db
            .execute(Select(By::<Option<InvestmentListing>, _>::new(l.id)))
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn locked_transactions_serialize() {
        let db = Memory::new();
        let l = listing("plot", investment_listing::Status::Available);

        let tx1 = db.execute(Transact).await.unwrap();
        tx1.execute(Lock(By::<InvestmentListing, _>::new(l.id)))
            .await
            .unwrap();

        let tx2 = db.execute(Transact).await.unwrap();
        let second = tokio::spawn(async move {
            tx2.execute(Lock(By::<InvestmentListing, _>::new(l.id)))
                .await
                .unwrap();
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!second.is_finished());

        tx1.execute(Commit).await.unwrap();
        second.await.unwrap();
    }
}
