//! Database migrations for content service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_tenants::Migration),
            Box::new(m20250301_000002_create_content_models::Migration),
            Box::new(m20250301_000003_create_content_entries::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    Slug,
    DisplayName,
    Active,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentModels {
    Table,
    Id,
    TenantId,
    ApiName,
    DisplayName,
    Description,
    Fields,
    Locales,
    Singleton,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentEntries {
    Table,
    Id,
    TenantId,
    ModelId,
    Locale,
    Data,
    SingletonGuard,
    CreatedAt,
    UpdatedAt,
}

fn timestamp(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20250301_000001_create_tenants {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_tenants"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tenants::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Tenants::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Tenants::Slug).string().not_null())
                        .col(ColumnDef::new(Tenants::DisplayName).string().not_null())
                        .col(
                            ColumnDef::new(Tenants::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Tenants::Metadata).json().not_null())
                        .col(timestamp(Tenants::CreatedAt))
                        .col(timestamp(Tenants::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_tenants_slug")
                        .table(Tenants::Table)
                        .col(Tenants::Slug)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tenants::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000002_create_content_models {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_content_models"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ContentModels::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContentModels::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ContentModels::TenantId).uuid().not_null())
                        .col(ColumnDef::new(ContentModels::ApiName).string().not_null())
                        .col(
                            ColumnDef::new(ContentModels::DisplayName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ContentModels::Description).text())
                        .col(ColumnDef::new(ContentModels::Fields).json().not_null())
                        .col(ColumnDef::new(ContentModels::Locales).json().not_null())
                        .col(
                            ColumnDef::new(ContentModels::Singleton)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(timestamp(ContentModels::CreatedAt))
                        .col(timestamp(ContentModels::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_content_models_tenant")
                                .from(ContentModels::Table, ContentModels::TenantId)
                                .to(Tenants::Table, Tenants::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_content_models_api_name")
                        .table(ContentModels::Table)
                        .col(ContentModels::ApiName)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_content_models_tenant_id")
                        .table(ContentModels::Table)
                        .col(ContentModels::TenantId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ContentModels::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000003_create_content_entries {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_content_entries"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ContentEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContentEntries::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ContentEntries::TenantId).uuid().not_null())
                        .col(ColumnDef::new(ContentEntries::ModelId).uuid().not_null())
                        .col(ColumnDef::new(ContentEntries::Locale).string())
                        .col(ColumnDef::new(ContentEntries::Data).json().not_null())
                        .col(ColumnDef::new(ContentEntries::SingletonGuard).uuid())
                        .col(timestamp(ContentEntries::CreatedAt))
                        .col(timestamp(ContentEntries::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_content_entries_model")
                                .from(ContentEntries::Table, ContentEntries::ModelId)
                                .to(ContentModels::Table, ContentModels::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // NULL guards never collide, so only singleton entries are constrained
            manager
                .create_index(
                    Index::create()
                        .name("idx_content_entries_singleton_guard")
                        .table(ContentEntries::Table)
                        .col(ContentEntries::SingletonGuard)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_content_entries_model_tenant")
                        .table(ContentEntries::Table)
                        .col(ContentEntries::ModelId)
                        .col(ContentEntries::TenantId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ContentEntries::Table).to_owned())
                .await
        }
    }
}
