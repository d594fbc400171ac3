use crate::{
    db::{self, DbPool},
    entities::inventory_item::{self, Entity as InventoryItemEntity},
    errors::ServiceError,
};
use metrics::counter;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Every field of an inventory item except the store-assigned id.
///
/// Used for both create and full-record replacement; there are no
/// partial updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct InventoryDraft {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Summer Dress")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_price")]
    #[schema(value_type = f64, example = 49.99)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    #[schema(example = 100)]
    pub stock: i32,
    #[validate(length(min = 1, message = "category must not be empty"))]
    #[schema(example = "Dresses")]
    pub category: String,
    #[validate(length(min = 1, message = "image must not be empty"))]
    #[schema(example = "/uploads/1718000000000.jpg")]
    pub image: String,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("price");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

impl InventoryDraft {
    fn into_active_model(self) -> inventory_item::ActiveModel {
        inventory_item::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            price: Set(self.price),
            stock: Set(self.stock),
            category: Set(self.category),
            image: Set(self.image),
        }
    }
}

/// The fixed catalog inserted when the table is found empty.
pub fn seed_items() -> Vec<InventoryDraft> {
    [
        ("Summer Dress", dec!(49.99), 100, "Dresses", "summer+dress"),
        ("Denim Jeans", dec!(59.99), 150, "Pants", "denim+jeans"),
        ("Floral Blouse", dec!(39.99), 80, "Tops", "floral+blouse"),
        ("Leather Jacket", dec!(99.99), 50, "Outerwear", "leather+jacket"),
        ("Sneakers", dec!(79.99), 120, "Shoes", "sneakers"),
    ]
    .into_iter()
    .map(|(name, price, stock, category, query)| InventoryDraft {
        name: name.to_string(),
        price,
        stock,
        category: category.to_string(),
        image: format!("https://source.unsplash.com/400x600/?{query}"),
    })
    .collect()
}

/// Owns the `inventory` table: schema, seeding and the four row operations.
///
/// Every operation is a single statement; conflicting writes are serialized
/// by SQLite and the last write wins.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
}

impl InventoryService {
    /// Creates a new inventory service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Ensures the table exists and seeds it when empty.
    ///
    /// Returns the number of seeded rows (0 when the table already had data).
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<usize, ServiceError> {
        db::run_migrations(&self.db_pool).await?;

        let db = &*self.db_pool;
        let existing = InventoryItemEntity::find().count(db).await?;
        if existing > 0 {
            info!(existing, "Inventory already populated; skipping seed");
            return Ok(0);
        }

        let seed = seed_items();
        let seeded = seed.len();
        for item in seed {
            item.into_active_model().insert(db).await.map_err(|e| {
                error!(error = %e, "Failed to insert seed item");
                ServiceError::DatabaseError(e)
            })?;
        }

        info!(seeded, "Seeded empty inventory table");
        Ok(seeded)
    }

    /// Lists every row in storage order. No pagination.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<inventory_item::Model>, ServiceError> {
        let db = &*self.db_pool;

        InventoryItemEntity::find()
            .order_by_asc(inventory_item::Column::Id)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when listing inventory");
                ServiceError::DatabaseError(e)
            })
    }

    /// Inserts a new row and returns it with its assigned id.
    #[instrument(skip(self))]
    pub async fn insert(&self, draft: InventoryDraft) -> Result<inventory_item::Model, ServiceError> {
        let db = &*self.db_pool;

        let created = draft.into_active_model().insert(db).await.map_err(|e| {
            error!(error = %e, "Database error when inserting inventory item");
            ServiceError::DatabaseError(e)
        })?;

        counter!("fashion_store.inventory.created", 1);
        info!(id = created.id, "Inventory item created");
        Ok(created)
    }

    /// Overwrites every field of the row with `id`.
    ///
    /// Returns the number of rows changed; 0 means no row had that id and
    /// nothing was written.
    #[instrument(skip(self))]
    pub async fn replace(&self, id: i32, draft: InventoryDraft) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;

        let result = InventoryItemEntity::update_many()
            .set(draft.into_active_model())
            .filter(inventory_item::Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Database error when replacing inventory item");
                ServiceError::DatabaseError(e)
            })?;

        counter!("fashion_store.inventory.replaced", result.rows_affected);
        Ok(result.rows_affected)
    }

    /// Removes the row with `id`. Returns the number of rows removed.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;

        let result = InventoryItemEntity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Database error when deleting inventory item");
                ServiceError::DatabaseError(e)
            })?;

        counter!("fashion_store.inventory.deleted", result.rows_affected);
        Ok(result.rows_affected)
    }
}
