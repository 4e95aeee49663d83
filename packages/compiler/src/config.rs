//! Generator Configuration
//!
//! Names of the runtime collaborator types and of the adapter's stored
//! fields. Every field has a default so partial configuration files work.

use crate::error::{GenerationError, Result};
use crate::logging::LogLevel;
use crate::model::TypeRef;
use crate::output::output_ast::ExternalReference;
use crate::wrapper::validation::{is_identifier, is_qualified_name};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ASYNC_HANDLE_TYPE: &str = "io.adapter.runtime.AsyncOperationHandle";
pub const DEFAULT_STREAM_HANDLE_TYPE: &str = "io.adapter.runtime.StreamHandle";
pub const DEFAULT_CONTEXT_PROVIDER_TYPE: &str = "io.adapter.runtime.ExecutionContextProvider";
pub const DEFAULT_STREAM_TYPE: &str = "kotlinx.coroutines.flow.Flow";
pub const DEFAULT_WRAPPED_FIELD_NAME: &str = "wrapped";
pub const DEFAULT_CONTEXT_PROVIDER_FIELD_NAME: &str = "contextProvider";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub async_handle_type: String,
    pub stream_handle_type: String,
    pub context_provider_type: String,
    /// Return type that marks a member as a stream operation.
    pub stream_type: String,
    pub wrapped_field_name: String,
    pub context_provider_field_name: String,
    /// Qualified top-level member passed by the secondary constructor.
    pub default_context_provider: Option<String>,
    pub log_level: LogLevel,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            async_handle_type: DEFAULT_ASYNC_HANDLE_TYPE.to_string(),
            stream_handle_type: DEFAULT_STREAM_HANDLE_TYPE.to_string(),
            context_provider_type: DEFAULT_CONTEXT_PROVIDER_TYPE.to_string(),
            stream_type: DEFAULT_STREAM_TYPE.to_string(),
            wrapped_field_name: DEFAULT_WRAPPED_FIELD_NAME.to_string(),
            context_provider_field_name: DEFAULT_CONTEXT_PROVIDER_FIELD_NAME.to_string(),
            default_context_provider: None,
            log_level: LogLevel::default(),
        }
    }
}

/// Collaborator types referenced by generated adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeTypes {
    pub async_handle: TypeRef,
    pub stream_handle: TypeRef,
    pub context_provider: TypeRef,
    pub stream: TypeRef,
}

impl RuntimeTypes {
    pub fn async_handle_of(&self, result: TypeRef) -> TypeRef {
        TypeRef::parameterized(self.async_handle.name.clone(), vec![result])
    }

    pub fn stream_handle_of(&self, element: TypeRef) -> TypeRef {
        TypeRef::parameterized(self.stream_handle.name.clone(), vec![element])
    }

    /// The provider type as stored by adapters: always nullable.
    pub fn optional_context_provider(&self) -> TypeRef {
        self.context_provider.clone().with_nullable(true)
    }
}

/// Names of the two fields every adapter stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub wrapped: String,
    pub context_provider: String,
}

impl GeneratorConfig {
    pub fn runtime_types(&self) -> Result<RuntimeTypes> {
        Ok(RuntimeTypes {
            async_handle: raw_type("asyncHandleType", &self.async_handle_type)?,
            stream_handle: raw_type("streamHandleType", &self.stream_handle_type)?,
            context_provider: raw_type("contextProviderType", &self.context_provider_type)?,
            stream: raw_type("streamType", &self.stream_type)?,
        })
    }

    pub fn field_names(&self) -> Result<FieldNames> {
        for (key, name) in [
            ("wrappedFieldName", &self.wrapped_field_name),
            ("contextProviderFieldName", &self.context_provider_field_name),
        ] {
            if !is_identifier(name) {
                return Err(GenerationError::InvalidConfig(format!(
                    "{} '{}' is not an identifier",
                    key, name
                )));
            }
        }
        if self.wrapped_field_name == self.context_provider_field_name {
            return Err(GenerationError::InvalidConfig(format!(
                "wrappedFieldName and contextProviderFieldName are both '{}'",
                self.wrapped_field_name
            )));
        }
        Ok(FieldNames {
            wrapped: self.wrapped_field_name.clone(),
            context_provider: self.context_provider_field_name.clone(),
        })
    }

    pub fn default_context_provider_ref(&self) -> Result<Option<ExternalReference>> {
        match self.default_context_provider.as_deref() {
            None => Ok(None),
            Some(provider) if is_qualified_name(provider) => {
                Ok(Some(ExternalReference::member(provider)))
            }
            Some(provider) => Err(GenerationError::InvalidConfig(format!(
                "defaultContextProvider '{}' is not a qualified member name",
                provider
            ))),
        }
    }
}

fn raw_type(key: &str, value: &str) -> Result<TypeRef> {
    if !is_qualified_name(value) {
        return Err(GenerationError::InvalidConfig(format!(
            "{} '{}' must be a qualified type name without arguments",
            key, value
        )));
    }
    Ok(TypeRef::new(value))
}
