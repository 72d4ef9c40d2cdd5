//! Database migrations for commerce service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_catalog::Migration),
            Box::new(m20250301_000002_create_orders::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum TbUser {
    Table,
    Id,
    Name,
    Email,
    Phone,
}

#[derive(DeriveIden)]
enum TbCategory {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum TbProduct {
    Table,
    Id,
    Name,
    Description,
    Price,
    ImgUrl,
}

#[derive(DeriveIden)]
enum TbProductCategory {
    Table,
    ProductId,
    CategoryId,
}

#[derive(DeriveIden)]
enum TbOrder {
    Table,
    Id,
    Moment,
    OrderStatus,
    ClientId,
}

#[derive(DeriveIden)]
enum TbPayment {
    Table,
    OrderId,
    Moment,
}

#[derive(DeriveIden)]
enum TbOrderItem {
    Table,
    OrderId,
    ProductId,
    Quantity,
    Price,
}

mod m20250301_000001_create_catalog {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_catalog"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TbUser::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TbUser::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TbUser::Name).string().not_null())
                        .col(ColumnDef::new(TbUser::Email).string().not_null())
                        .col(ColumnDef::new(TbUser::Phone).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TbCategory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TbCategory::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TbCategory::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TbProduct::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TbProduct::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TbProduct::Name).string().not_null())
                        .col(
                            ColumnDef::new(TbProduct::Description)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(TbProduct::Price)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TbProduct::ImgUrl)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TbProductCategory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TbProductCategory::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TbProductCategory::CategoryId)
                                .big_integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(TbProductCategory::ProductId)
                                .col(TbProductCategory::CategoryId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_category_product")
                                .from(TbProductCategory::Table, TbProductCategory::ProductId)
                                .to(TbProduct::Table, TbProduct::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_category_category")
                                .from(TbProductCategory::Table, TbProductCategory::CategoryId)
                                .to(TbCategory::Table, TbCategory::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TbProductCategory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TbProduct::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TbCategory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TbUser::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000002_create_orders {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TbOrder::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TbOrder::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(TbOrder::Moment)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TbOrder::OrderStatus).integer().not_null())
                        .col(ColumnDef::new(TbOrder::ClientId).big_integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_client")
                                .from(TbOrder::Table, TbOrder::ClientId)
                                .to(TbUser::Table, TbUser::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TbPayment::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TbPayment::OrderId)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(TbPayment::Moment)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_payment_order")
                                .from(TbPayment::Table, TbPayment::OrderId)
                                .to(TbOrder::Table, TbOrder::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TbOrderItem::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(TbOrderItem::OrderId).big_integer().not_null())
                        .col(
                            ColumnDef::new(TbOrderItem::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TbOrderItem::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(TbOrderItem::Price)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(TbOrderItem::OrderId)
                                .col(TbOrderItem::ProductId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_item_order")
                                .from(TbOrderItem::Table, TbOrderItem::OrderId)
                                .to(TbOrder::Table, TbOrder::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_item_product")
                                .from(TbOrderItem::Table, TbOrderItem::ProductId)
                                .to(TbProduct::Table, TbProduct::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_client_id")
                        .table(TbOrder::Table)
                        .col(TbOrder::ClientId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TbOrderItem::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TbPayment::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TbOrder::Table).to_owned())
                .await
        }
    }
}
