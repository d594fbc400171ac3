use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// One catalog row of the `inventory` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Store-assigned, never reused
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    /// Absolute URL or `/uploads/...` path
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
