//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation. Regenerate with `diesel print-schema` when
//! the migrations change.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Salted password hash, `<hex salt>$<hex digest>`.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clothing items, each owned by one user.
    wardrobe_items (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Category slug, one of the seven fixed values.
        category -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Optional image reference.
        image_url -> Nullable<Text>,
        /// Record creation timestamp; listings order by this, newest first.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Composed outfits.
    outfits (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Display label.
        name -> Varchar,
        /// Optional AI-generated rationale.
        rationale -> Nullable<Text>,
        /// Record creation timestamp; listings order by this, newest first.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered item references inside an outfit.
    outfit_items (outfit_id, position) {
        /// Owning outfit.
        outfit_id -> Uuid,
        /// Referenced wardrobe item.
        item_id -> Uuid,
        /// Zero-based slot preserving composition order.
        position -> Int4,
    }
}

diesel::joinable!(wardrobe_items -> users (user_id));
diesel::joinable!(outfits -> users (user_id));
diesel::joinable!(outfit_items -> outfits (outfit_id));
diesel::joinable!(outfit_items -> wardrobe_items (item_id));

diesel::allow_tables_to_appear_in_same_query!(users, wardrobe_items, outfits, outfit_items);
