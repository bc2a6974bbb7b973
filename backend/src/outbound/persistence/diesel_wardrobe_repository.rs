//! PostgreSQL-backed `WardrobeRepository` implementation using Diesel ORM.
//!
//! A foreign key violation on `wardrobe_items.user_id` surfaces as
//! [`WardrobePersistenceError::UnknownOwner`]; ownership checks beyond that
//! belong to the service layer. Deletes hitting the `outfit_items` restrict
//! constraint surface as [`WardrobePersistenceError::ItemInUse`].

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{WardrobePersistenceError, WardrobeRepository};
use crate::domain::{Category, ImageUrl, ItemDescription, ItemId, UserId, WardrobeItem};

use super::diesel_helpers::{diesel_error_message, is_foreign_key_violation};
use super::models::{NewWardrobeItemRow, WardrobeItemRow};
use super::pool::DbPool;
use super::schema::wardrobe_items;

/// Diesel-backed implementation of the `WardrobeRepository` port.
#[derive(Clone)]
pub struct DieselWardrobeRepository {
    pool: DbPool,
}

impl DieselWardrobeRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        WardrobePersistenceError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| WardrobePersistenceError::connection(err.message()))
    }
}

fn row_to_item(row: WardrobeItemRow) -> Result<WardrobeItem, WardrobePersistenceError> {
    let category = Category::from_str(&row.category)
        .map_err(|err| WardrobePersistenceError::query(format!("stored category invalid: {err}")))?;
    let description = ItemDescription::new(row.description).map_err(|err| {
        WardrobePersistenceError::query(format!("stored description invalid: {err}"))
    })?;
    let image = row
        .image_url
        .map(ImageUrl::parse)
        .transpose()
        .map_err(|err| WardrobePersistenceError::query(format!("stored image url invalid: {err}")))?;

    Ok(WardrobeItem {
        id: ItemId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        category,
        description,
        image,
    })
}

fn map_write_error(error: diesel::result::Error, operation: &str) -> WardrobePersistenceError {
    if is_foreign_key_violation(&error) {
        WardrobePersistenceError::UnknownOwner
    } else {
        WardrobePersistenceError::query(diesel_error_message(&error, operation))
    }
}

#[async_trait]
impl WardrobeRepository for DieselWardrobeRepository {
    async fn insert(&self, item: &WardrobeItem) -> Result<(), WardrobePersistenceError> {
        let mut conn = self.connection().await?;

        let row = NewWardrobeItemRow {
            id: *item.id.as_uuid(),
            user_id: *item.owner.as_uuid(),
            category: item.category.as_str(),
            description: item.description.as_ref(),
            image_url: item.image.as_ref().map(ImageUrl::as_str),
        };

        diesel::insert_into(wardrobe_items::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, "insert wardrobe item"))?;
        Ok(())
    }

    async fn find(&self, id: &ItemId) -> Result<Option<WardrobeItem>, WardrobePersistenceError> {
        let mut conn = self.connection().await?;

        let row: Option<WardrobeItemRow> = wardrobe_items::table
            .find(id.as_uuid())
            .select(WardrobeItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                WardrobePersistenceError::query(diesel_error_message(&err, "find wardrobe item"))
            })?;

        row.map(row_to_item).transpose()
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        category: Option<Category>,
    ) -> Result<Vec<WardrobeItem>, WardrobePersistenceError> {
        let mut conn = self.connection().await?;

        let mut query = wardrobe_items::table
            .filter(wardrobe_items::user_id.eq(owner.as_uuid()))
            .select(WardrobeItemRow::as_select())
            .order(wardrobe_items::created_at.desc())
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(wardrobe_items::category.eq(category.as_str()));
        }

        let rows: Vec<WardrobeItemRow> = query.load(&mut conn).await.map_err(|err| {
            WardrobePersistenceError::query(diesel_error_message(&err, "list wardrobe items"))
        })?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn update(&self, item: &WardrobeItem) -> Result<bool, WardrobePersistenceError> {
        let mut conn = self.connection().await?;

        let affected = diesel::update(wardrobe_items::table.find(item.id.as_uuid()))
            .set((
                wardrobe_items::category.eq(item.category.as_str()),
                wardrobe_items::description.eq(item.description.as_ref()),
                wardrobe_items::image_url.eq(item.image.as_ref().map(ImageUrl::as_str)),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, "update wardrobe item"))?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, WardrobePersistenceError> {
        let mut conn = self.connection().await?;

        let affected = diesel::delete(wardrobe_items::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                // The only foreign key pointing at wardrobe_items comes from
                // outfit_items, which restricts deletion.
                if is_foreign_key_violation(&err) {
                    WardrobePersistenceError::ItemInUse
                } else {
                    WardrobePersistenceError::query(diesel_error_message(
                        &err,
                        "delete wardrobe item",
                    ))
                }
            })?;

        Ok(affected > 0)
    }
}
