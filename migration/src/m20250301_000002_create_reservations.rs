use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // user and restaurant ids are not enforced as foreign keys
                    .col(ColumnDef::new(Reservations::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Reservations::RestaurantId).big_integer().not_null())
                    .col(ColumnDef::new(Reservations::RestaurantName).string().null())
                    .col(ColumnDef::new(Reservations::UserName).string().not_null())
                    .col(ColumnDef::new(Reservations::UserPhone).string().not_null())
                    .col(ColumnDef::new(Reservations::UserEmail).string().null())
                    .col(ColumnDef::new(Reservations::ReservationDate).date().not_null())
                    .col(ColumnDef::new(Reservations::ReservationTime).time().not_null())
                    .col(ColumnDef::new(Reservations::Guests).integer().not_null())
                    .col(ColumnDef::new(Reservations::SpecialRequests).string_len(1000).null())
                    .col(ColumnDef::new(Reservations::Status).string().not_null().default("PENDING"))
                    .col(ColumnDef::new(Reservations::RejectionReason).string().null())
                    .col(ColumnDef::new(Reservations::VisitStatus).string().not_null().default("PENDING"))
                    .col(ColumnDef::new(Reservations::VisitConfirmedAt).big_integer().null())
                    .col(ColumnDef::new(Reservations::NoShowReason).string().null())
                    .col(ColumnDef::new(Reservations::BlacklistReason).string().null())
                    .col(ColumnDef::new(Reservations::IsBlacklisted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Reservations::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Reservations::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user_id")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_restaurant_id")
                    .table(Reservations::Table)
                    .col(Reservations::RestaurantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    UserId,
    RestaurantId,
    RestaurantName,
    UserName,
    UserPhone,
    UserEmail,
    ReservationDate,
    ReservationTime,
    Guests,
    SpecialRequests,
    Status,
    RejectionReason,
    VisitStatus,
    VisitConfirmedAt,
    NoShowReason,
    BlacklistReason,
    IsBlacklisted,
    CreatedAt,
    UpdatedAt,
}
