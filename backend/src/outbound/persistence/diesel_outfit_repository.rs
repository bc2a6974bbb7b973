//! PostgreSQL-backed `OutfitRepository` implementation using Diesel ORM.
//!
//! An outfit spans two tables: the `outfits` header row and one
//! `outfit_items` row per referenced item, keyed by position. Inserts run in
//! a transaction so a half-written outfit can never be observed.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{OutfitPersistenceError, OutfitRepository};
use crate::domain::{ItemId, Outfit, OutfitId, OutfitName, UserId};

use super::diesel_helpers::diesel_error_message;
use super::models::{NewOutfitRow, OutfitItemRow, OutfitRow};
use super::pool::DbPool;
use super::schema::{outfit_items, outfits};

/// Diesel-backed implementation of the `OutfitRepository` port.
#[derive(Clone)]
pub struct DieselOutfitRepository {
    pool: DbPool,
}

impl DieselOutfitRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_outfit(
    row: OutfitRow,
    items: Vec<ItemId>,
) -> Result<Outfit, OutfitPersistenceError> {
    let name = OutfitName::new(row.name)
        .map_err(|err| OutfitPersistenceError::query(format!("stored name invalid: {err}")))?;
    Outfit::new(
        OutfitId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        name,
        items,
        row.rationale,
    )
    .map_err(|err| OutfitPersistenceError::query(format!("stored outfit invalid: {err}")))
}

/// Pair header rows with their ordered item references.
///
/// A header without any item rows is skipped rather than failing the whole
/// listing; such rows can only exist through writes outside the application.
fn assemble_outfits(
    headers: Vec<OutfitRow>,
    item_rows: Vec<OutfitItemRow>,
) -> Result<Vec<Outfit>, OutfitPersistenceError> {
    let mut items_by_outfit: HashMap<Uuid, Vec<ItemId>> = HashMap::new();
    for row in item_rows {
        items_by_outfit
            .entry(row.outfit_id)
            .or_default()
            .push(ItemId::from_uuid(row.item_id));
    }

    let mut outfits = Vec::with_capacity(headers.len());
    for row in headers {
        let Some(items) = items_by_outfit.remove(&row.id) else {
            warn!(outfit_id = %row.id, "outfit has no item rows; skipping");
            continue;
        };
        outfits.push(rows_to_outfit(row, items)?);
    }
    Ok(outfits)
}

#[async_trait]
impl OutfitRepository for DieselOutfitRepository {
    async fn insert(&self, outfit: &Outfit) -> Result<(), OutfitPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| OutfitPersistenceError::connection(err.message()))?;

        let header = NewOutfitRow {
            id: *outfit.id.as_uuid(),
            user_id: *outfit.owner.as_uuid(),
            name: outfit.name.as_ref(),
            rationale: outfit.rationale.as_deref(),
        };
        let item_rows: Vec<OutfitItemRow> = outfit
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| OutfitItemRow {
                outfit_id: *outfit.id.as_uuid(),
                item_id: *item.as_uuid(),
                position: i32::try_from(position).unwrap_or(i32::MAX),
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(outfits::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                diesel::insert_into(outfit_items::table)
                    .values(&item_rows)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| OutfitPersistenceError::query(diesel_error_message(&err, "insert outfit")))
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Outfit>, OutfitPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| OutfitPersistenceError::connection(err.message()))?;

        let headers: Vec<OutfitRow> = outfits::table
            .filter(outfits::user_id.eq(owner.as_uuid()))
            .select(OutfitRow::as_select())
            .order(outfits::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(|err| {
                OutfitPersistenceError::query(diesel_error_message(&err, "list outfits"))
            })?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = headers.iter().map(|row| row.id).collect();
        let item_rows: Vec<OutfitItemRow> = outfit_items::table
            .filter(outfit_items::outfit_id.eq_any(&ids))
            .select(OutfitItemRow::as_select())
            .order((outfit_items::outfit_id, outfit_items::position))
            .load(&mut conn)
            .await
            .map_err(|err| {
                OutfitPersistenceError::query(diesel_error_message(&err, "list outfit items"))
            })?;

        assemble_outfits(headers, item_rows)
    }
}
