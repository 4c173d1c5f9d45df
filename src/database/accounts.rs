use crate::database::MongoDB;
use crate::models::Account;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::Error;
use mongodb::Collection;

/// Typed access to the `users` collection.
///
/// Every store operation the service consumes lives here; translating
/// driver errors into the API taxonomy is the service layer's job.
pub struct AccountStore {
    collection: Collection<Account>,
}

impl AccountStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<Account>("users"),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.collection.find_one(doc! { "email": email }).await
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Account>, Error> {
        let mut cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;

        let mut accounts = Vec::new();
        while let Some(account) = cursor.try_next().await? {
            accounts.push(account);
        }
        Ok(accounts)
    }

    /// Inserts a new account and returns the generated id.
    pub async fn insert(&self, mut account: Account) -> Result<ObjectId, Error> {
        let id = *account.id.get_or_insert_with(ObjectId::new);
        self.collection.insert_one(&account).await?;
        Ok(id)
    }

    /// `$set`s partial fields on a single account.
    pub async fn update_by_id(&self, id: ObjectId, fields: Document) -> Result<(), Error> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;
        Ok(())
    }

    /// `$set`s partial fields on every account in `ids`. Ids matching no
    /// document are silently ignored. Returns (matched, modified).
    pub async fn update_many_by_ids(
        &self,
        ids: &[ObjectId],
        fields: Document,
    ) -> Result<(u64, u64), Error> {
        let result = self
            .collection
            .update_many(doc! { "_id": { "$in": ids.to_vec() } }, doc! { "$set": fields })
            .await?;
        Ok((result.matched_count, result.modified_count))
    }

    /// Physically removes every account in `ids`; returns the deleted count.
    pub async fn delete_many_by_ids(&self, ids: &[ObjectId]) -> Result<u64, Error> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(result.deleted_count)
    }

    /// Every persisted account, unfiltered, in natural order.
    pub async fn list_all(&self) -> Result<Vec<Account>, Error> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut accounts = Vec::new();
        while let Some(account) = cursor.try_next().await? {
            accounts.push(account);
        }
        Ok(accounts)
    }
}
