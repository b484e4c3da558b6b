use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: Option<String>,

    // Requester snapshot taken at booking time
    pub user_name: String,
    pub user_phone: String,
    pub user_email: Option<String>,

    pub reservation_date: chrono::NaiveDate,
    pub reservation_time: chrono::NaiveTime,
    pub guests: i32,
    pub special_requests: Option<String>,

    pub status: String,
    pub rejection_reason: Option<String>,

    pub visit_status: String,
    pub visit_confirmed_at: Option<i64>,
    pub no_show_reason: Option<String>,
    pub blacklist_reason: Option<String>,
    pub is_blacklisted: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
