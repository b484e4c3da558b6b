use sea_orm::entity::prelude::*;

/// Account row shared by all three roles
///
/// Owner-only columns stay NULL for admins and customers. Both status
/// columns exist on every row; only the one matching `role` is meaningful.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub real_name: String,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    pub nickname: Option<String>,

    // ADMIN, CUSTOMER or OWNER
    pub role: String,
    pub customer_status: String,
    pub owner_status: String,

    // Store profile (OWNER)
    pub store_name: Option<String>,
    pub store_phone: Option<String>,
    pub road_address: Option<String>,
    pub detail_address: Option<String>,
    pub business_number: Option<String>,
    pub business_registration_doc: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
