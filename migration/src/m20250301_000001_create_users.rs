use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::RealName).string().not_null())
                    // SQLite allows many NULLs under a unique constraint
                    .col(ColumnDef::new(Users::Phone).string().null().unique_key())
                    .col(ColumnDef::new(Users::Nickname).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CustomerStatus).string().not_null().default("ACTIVE"))
                    .col(ColumnDef::new(Users::OwnerStatus).string().not_null().default("PENDING"))
                    .col(ColumnDef::new(Users::StoreName).string().null())
                    .col(ColumnDef::new(Users::StorePhone).string().null())
                    .col(ColumnDef::new(Users::RoadAddress).string().null())
                    .col(ColumnDef::new(Users::DetailAddress).string().null())
                    .col(ColumnDef::new(Users::BusinessNumber).string().null())
                    .col(ColumnDef::new(Users::BusinessRegistrationDoc).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    RealName,
    Phone,
    Nickname,
    Role,
    CustomerStatus,
    OwnerStatus,
    StoreName,
    StorePhone,
    RoadAddress,
    DetailAddress,
    BusinessNumber,
    BusinessRegistrationDoc,
    CreatedAt,
    UpdatedAt,
}
