//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract;

// ===== Tenant conversions =====

impl From<contract::Tenant> for TenantDto {
    fn from(tenant: contract::Tenant) -> Self {
        Self {
            id: tenant.id,
            slug: tenant.slug,
            display_name: tenant.display_name,
            active: tenant.active,
            metadata: tenant.metadata,
            created_at: tenant.created_at,
            updated_at: tenant.updated_at,
        }
    }
}

impl From<CreateTenantRequest> for contract::NewTenant {
    fn from(req: CreateTenantRequest) -> Self {
        Self {
            slug: req.slug,
            display_name: req.display_name,
            metadata: req.metadata,
        }
    }
}

impl From<UpdateTenantRequest> for contract::TenantPatch {
    fn from(req: UpdateTenantRequest) -> Self {
        Self {
            display_name: req.display_name,
            active: req.active,
            metadata: req.metadata,
        }
    }
}

// ===== Field conversions =====

impl From<contract::FieldType> for FieldTypeDto {
    fn from(ty: contract::FieldType) -> Self {
        use contract::FieldType;

        match ty {
            FieldType::Text => Self::Text,
            FieldType::RichText => Self::RichText,
            FieldType::Number => Self::Number,
            FieldType::Boolean => Self::Boolean,
            FieldType::Date => Self::Date,
            FieldType::Media => Self::Media,
            FieldType::Relation => Self::Relation,
            FieldType::Json => Self::Json,
        }
    }
}

impl From<FieldTypeDto> for contract::FieldType {
    fn from(dto: FieldTypeDto) -> Self {
        match dto {
            FieldTypeDto::Text => Self::Text,
            FieldTypeDto::RichText => Self::RichText,
            FieldTypeDto::Number => Self::Number,
            FieldTypeDto::Boolean => Self::Boolean,
            FieldTypeDto::Date => Self::Date,
            FieldTypeDto::Media => Self::Media,
            FieldTypeDto::Relation => Self::Relation,
            FieldTypeDto::Json => Self::Json,
        }
    }
}

impl From<contract::FieldSchema> for FieldSchemaDto {
    fn from(field: contract::FieldSchema) -> Self {
        Self {
            key: field.key,
            display_name: field.display_name,
            field_type: field.field_type.into(),
            required: field.required,
            unique: field.unique,
            help_text: field.help_text,
            default_value: field.default_value,
            schema: field.schema,
        }
    }
}

impl From<FieldSchemaDto> for contract::FieldSchema {
    fn from(dto: FieldSchemaDto) -> Self {
        let display_name = if dto.display_name.trim().is_empty() {
            dto.key.clone()
        } else {
            dto.display_name
        };

        Self {
            key: dto.key,
            display_name,
            field_type: dto.field_type.into(),
            required: dto.required,
            unique: dto.unique,
            help_text: dto.help_text,
            default_value: dto.default_value,
            schema: dto.schema,
        }
    }
}

// ===== Content model conversions =====

impl From<contract::ContentModel> for ContentModelDto {
    fn from(model: contract::ContentModel) -> Self {
        Self {
            id: model.id,
            tenant_id: model.tenant_id,
            api_name: model.api_name,
            display_name: model.display_name,
            description: model.description,
            fields: model.fields.into_iter().map(Into::into).collect(),
            locales: model.locales,
            singleton: model.singleton,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CreateContentModelRequest> for contract::NewContentModel {
    fn from(req: CreateContentModelRequest) -> Self {
        Self {
            tenant_id: req.tenant_id,
            api_name: req.api_name,
            display_name: req.display_name,
            description: req.description,
            fields: req.fields.into_iter().map(Into::into).collect(),
            locales: req.locales,
            singleton: req.singleton,
        }
    }
}

impl From<UpdateContentModelRequest> for contract::ContentModelPatch {
    fn from(req: UpdateContentModelRequest) -> Self {
        Self {
            api_name: req.api_name,
            display_name: req.display_name,
            description: req.description,
            fields: req
                .fields
                .map(|fields| fields.into_iter().map(Into::into).collect()),
            locales: req.locales,
            singleton: req.singleton,
        }
    }
}

// ===== Content entry conversions =====

impl From<contract::ContentEntry> for ContentEntryDto {
    fn from(entry: contract::ContentEntry) -> Self {
        Self {
            id: entry.id,
            tenant_id: entry.tenant_id,
            model_id: entry.model_id,
            locale: entry.locale,
            values: entry.values,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl From<EntryValuesRequest> for contract::ContentEntryPatch {
    fn from(req: EntryValuesRequest) -> Self {
        Self {
            values: req.values,
            locale: req.locale,
        }
    }
}
