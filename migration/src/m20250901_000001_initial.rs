use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
    Name,
    Username,
    Requisites,
    RequisiteType,
    BonusStatus,
    Code,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    Id,
    FullName,
    Phone,
    Email,
    Telegram,
    PartnerCode,
    Source,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    FullName,
    Email,
    Source,
    Product,
    Amount,
    PromoCodeId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PromoCodes {
    Table,
    Id,
    Code,
    DiscountPercent,
    DiscountAmount,
    IsActive,
    UsageLimit,
    UsageCount,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Visitors {
    Table,
    Id,
    TrafficSource,
    UtmTags,
    Country,
    Device,
    Browser,
    PagesViewed,
    TimeOnSite,
    CookieFile,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Buttons {
    Table,
    Id,
    Name,
    Type,
    Url,
    Description,
    IsActive,
    ClickCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    Text,
    End,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("requisite_type"))
                    .values(vec![
                        Alias::new("Card"),
                        Alias::new("Yoomoney"),
                        Alias::new("Crypto"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("partner_bonus_status"))
                    .values(vec![
                        Alias::new("PENDING"),
                        Alias::new("COMPLETED"),
                        Alias::new("REJECTED"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("request_status"))
                    .values(vec![
                        Alias::new("PENDING"),
                        Alias::new("APPROVED"),
                        Alias::new("REJECTED"),
                        Alias::new("IN_PROGRESS"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("payment_status"))
                    .values(vec![Alias::new("PENDING"), Alias::new("COMPLETED")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Partners::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Partners::Name).string().not_null())
                    .col(
                        ColumnDef::new(Partners::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Partners::Requisites).string().not_null())
                    .col(
                        ColumnDef::new(Partners::RequisiteType)
                            .custom(Alias::new("requisite_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partners::BonusStatus)
                            .custom(Alias::new("partner_bonus_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partners::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Partners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Partners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requests::FullName).string().not_null())
                    .col(ColumnDef::new(Requests::Phone).string().not_null())
                    .col(ColumnDef::new(Requests::Email).string().not_null())
                    .col(ColumnDef::new(Requests::Telegram).string().null())
                    .col(ColumnDef::new(Requests::PartnerCode).string().null())
                    .col(ColumnDef::new(Requests::Source).string().not_null())
                    .col(
                        ColumnDef::new(Requests::Status)
                            .custom(Alias::new("request_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Requests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_partner_code")
                    .table(Requests::Table)
                    .col(Requests::PartnerCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_status")
                    .table(Requests::Table)
                    .col(Requests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromoCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromoCodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PromoCodes::DiscountPercent).integer().null())
                    .col(
                        ColumnDef::new(PromoCodes::DiscountAmount)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(PromoCodes::UsageLimit).integer().null())
                    .col(
                        ColumnDef::new(PromoCodes::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::FullName).string().not_null())
                    .col(ColumnDef::new(Payments::Email).string().not_null())
                    .col(ColumnDef::new(Payments::Source).string().not_null())
                    .col(ColumnDef::new(Payments::Product).string().not_null())
                    .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Payments::PromoCodeId).integer().null())
                    .col(
                        ColumnDef::new(Payments::Status)
                            .custom(Alias::new("payment_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Payments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_promo_code_id")
                            .from(Payments::Table, Payments::PromoCodeId)
                            .to(PromoCodes::Table, PromoCodes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_status")
                    .table(Payments::Table)
                    .col(Payments::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_email")
                    .table(Payments::Table)
                    .col(Payments::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Visitors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visitors::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visitors::TrafficSource).string().not_null())
                    .col(ColumnDef::new(Visitors::UtmTags).string().null())
                    .col(ColumnDef::new(Visitors::Country).string().not_null())
                    .col(ColumnDef::new(Visitors::Device).string().not_null())
                    .col(ColumnDef::new(Visitors::Browser).string().not_null())
                    .col(ColumnDef::new(Visitors::PagesViewed).integer().null())
                    .col(ColumnDef::new(Visitors::TimeOnSite).string().not_null())
                    .col(ColumnDef::new(Visitors::CookieFile).string().not_null())
                    .col(
                        ColumnDef::new(Visitors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Visitors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Buttons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Buttons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Buttons::Name).string().not_null())
                    .col(ColumnDef::new(Buttons::Type).string().not_null())
                    .col(ColumnDef::new(Buttons::Url).string().null())
                    .col(ColumnDef::new(Buttons::Description).string().null())
                    .col(
                        ColumnDef::new(Buttons::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Buttons::ClickCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Buttons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Buttons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_buttons_name")
                    .table(Buttons::Table)
                    .col(Buttons::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::Text).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::End)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Notifications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Buttons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Visitors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PromoCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partners::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("payment_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("request_status")).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("partner_bonus_status"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("requisite_type")).to_owned())
            .await?;

        Ok(())
    }
}
