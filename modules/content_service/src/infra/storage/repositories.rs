//! SeaORM repository implementations

use crate::contract::{ContentEntry, ContentModel, Tenant};
use crate::domain::repository::{
    ContentEntryRepository, ContentModelRepository, TenantRepository, UniqueConstraint,
    UniqueViolation,
};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{content_entry, content_model, tenant};
use super::mapper::entry_active_model;

/// Translate a unique-index violation into [`UniqueViolation`]
fn unique_aware(err: DbErr, constraint: UniqueConstraint) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, ?constraint, "Unique constraint rejected write");
            UniqueViolation { constraint }.into()
        }
        _ => err.into(),
    }
}

// ===== Tenant Repository =====

pub struct SeaOrmTenantRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTenantRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TenantRepository for SeaOrmTenantRepository {
    async fn insert(&self, tenant: &Tenant) -> Result<Tenant> {
        let active: tenant::ActiveModel = tenant.into();
        let result = tenant::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| unique_aware(e, UniqueConstraint::TenantSlug))?;

        Ok(result.into())
    }

    async fn update(&self, tenant: &Tenant) -> Result<Tenant> {
        let active: tenant::ActiveModel = tenant.into();
        let result = tenant::Entity::update(active)
            .exec(&*self.db)
            .await
            .map_err(|e| unique_aware(e, UniqueConstraint::TenantSlug))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>> {
        let result = tenant::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>> {
        let result = tenant::Entity::find()
            .filter(tenant::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Tenant>> {
        let results = tenant::Entity::find()
            .order_by_asc(tenant::Column::Slug)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        tenant::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}

// ===== Content Model Repository =====

pub struct SeaOrmContentModelRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmContentModelRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentModelRepository for SeaOrmContentModelRepository {
    async fn insert(&self, model: &ContentModel) -> Result<ContentModel> {
        let active = content_model::ActiveModel::try_from(model)?;
        let result = content_model::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| unique_aware(e, UniqueConstraint::ModelApiName))?;

        result.try_into()
    }

    async fn update(&self, model: &ContentModel) -> Result<ContentModel> {
        let active = content_model::ActiveModel::try_from(model)?;
        let result = content_model::Entity::update(active)
            .exec(&*self.db)
            .await
            .map_err(|e| unique_aware(e, UniqueConstraint::ModelApiName))?;

        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentModel>> {
        content_model::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn find_by_api_name(&self, api_name: &str) -> Result<Option<ContentModel>> {
        content_model::Entity::find()
            .filter(content_model::Column::ApiName.eq(api_name))
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list(&self, tenant_id: Option<Uuid>) -> Result<Vec<ContentModel>> {
        let mut query = content_model::Entity::find();
        if let Some(tid) = tenant_id {
            query = query.filter(content_model::Column::TenantId.eq(tid));
        }

        query
            .order_by_desc(content_model::Column::CreatedAt)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn count_by_tenant(&self, tenant_id: Uuid) -> Result<u64> {
        let count = content_model::Entity::find()
            .filter(content_model::Column::TenantId.eq(tenant_id))
            .count(&*self.db)
            .await?;
        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        content_model::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Content Entry Repository =====

pub struct SeaOrmContentEntryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmContentEntryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentEntryRepository for SeaOrmContentEntryRepository {
    async fn insert(&self, entry: &ContentEntry, singleton: bool) -> Result<ContentEntry> {
        let result = content_entry::Entity::insert(entry_active_model(entry, singleton))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| unique_aware(e, UniqueConstraint::EntrySingleton))?;

        result.try_into()
    }

    async fn update(&self, entry: &ContentEntry) -> Result<ContentEntry> {
        use sea_orm::ActiveValue::NotSet;

        // The singleton guard is owned by insert and set_singleton_guard
        let mut active = entry_active_model(entry, false);
        active.singleton_guard = NotSet;
        active.created_at = NotSet;

        let result = content_entry::Entity::update(active)
            .exec(&*self.db)
            .await?;
        result.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentEntry>> {
        content_entry::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list_by_model(
        &self,
        model_id: Uuid,
        tenant_id: Option<Uuid>,
        locale: Option<&str>,
    ) -> Result<Vec<ContentEntry>> {
        let mut query =
            content_entry::Entity::find().filter(content_entry::Column::ModelId.eq(model_id));

        if let Some(tid) = tenant_id {
            query = query.filter(content_entry::Column::TenantId.eq(tid));
        }
        if let Some(locale) = locale {
            query = query.filter(content_entry::Column::Locale.eq(locale));
        }

        query
            .order_by_desc(content_entry::Column::CreatedAt)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn count_by_model(&self, model_id: Uuid) -> Result<u64> {
        let count = content_entry::Entity::find()
            .filter(content_entry::Column::ModelId.eq(model_id))
            .count(&*self.db)
            .await?;
        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        content_entry::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn delete_by_model(&self, model_id: Uuid) -> Result<u64> {
        let result = content_entry::Entity::delete_many()
            .filter(content_entry::Column::ModelId.eq(model_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn set_singleton_guard(&self, model_id: Uuid, singleton: bool) -> Result<u64> {
        let guard: Option<Uuid> = singleton.then_some(model_id);
        let result = content_entry::Entity::update_many()
            .col_expr(content_entry::Column::SingletonGuard, Expr::value(guard))
            .filter(content_entry::Column::ModelId.eq(model_id))
            .exec(&*self.db)
            .await
            .map_err(|e| unique_aware(e, UniqueConstraint::EntrySingleton))?;
        Ok(result.rows_affected)
    }
}
