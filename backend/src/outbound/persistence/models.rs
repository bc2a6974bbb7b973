//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversion into domain types happens in the repository adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{outfit_items, outfits, users, wardrobe_items};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the wardrobe_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wardrobe_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WardrobeItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    #[expect(dead_code, reason = "schema field; listings order by it in SQL")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new wardrobe item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wardrobe_items)]
pub(crate) struct NewWardrobeItemRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
}

/// Row struct for reading from the outfits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = outfits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OutfitRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub rationale: Option<String>,
    #[expect(dead_code, reason = "schema field; listings order by it in SQL")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new outfit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = outfits)]
pub(crate) struct NewOutfitRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub rationale: Option<&'a str>,
}

/// Row struct shared by reads and inserts on the outfit_items table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = outfit_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OutfitItemRow {
    pub outfit_id: Uuid,
    pub item_id: Uuid,
    pub position: i32,
}
