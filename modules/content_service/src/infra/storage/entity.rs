//! SeaORM entities for database tables

/// Tenants table entity
pub mod tenant {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "tenants")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// URL-safe slug (unique index)
        #[sea_orm(unique)]
        pub slug: String,

        pub display_name: String,

        pub active: bool,

        /// Free-form JSON object
        pub metadata: Json,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with content models
        #[sea_orm(has_many = "super::content_model::Entity")]
        ContentModels,
    }

    impl Related<super::content_model::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ContentModels.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Content models table entity
pub mod content_model {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "content_models")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Owning tenant
        pub tenant_id: Uuid,

        /// Globally unique api name (unique index)
        #[sea_orm(unique)]
        pub api_name: String,

        pub display_name: String,

        pub description: Option<String>,

        /// Ordered field schemas as a JSON array
        pub fields: Json,

        /// Locale codes as a JSON array
        pub locales: Json,

        pub singleton: bool,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::tenant::Entity",
            from = "Column::TenantId",
            to = "super::tenant::Column::Id",
            on_delete = "Cascade"
        )]
        Tenant,
        #[sea_orm(has_many = "super::content_entry::Entity")]
        ContentEntries,
    }

    impl Related<super::tenant::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Tenant.def()
        }
    }

    impl Related<super::content_entry::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ContentEntries.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Content entries table entity
pub mod content_entry {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "content_entries")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub tenant_id: Uuid,

        pub model_id: Uuid,

        pub locale: Option<String>,

        /// Field key -> value object
        pub data: Json,

        /// Set to the model id for singleton models; the unique index admits one entry
        #[sea_orm(unique)]
        pub singleton_guard: Option<Uuid>,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::content_model::Entity",
            from = "Column::ModelId",
            to = "super::content_model::Column::Id",
            on_delete = "Cascade"
        )]
        ContentModel,
    }

    impl Related<super::content_model::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ContentModel.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
