use crate::converter::{ConverterConfig, ConverterError, ConverterFactory, TypedMessageConverter};
use crate::description::ContractType;
use crate::formatter::FormatOption;
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConverterKey {
  type_id: TypeId,
  action: Option<String>,
  namespace: String,
  format: FormatOption,
}

impl ConverterKey {
  fn new(contract_type: &ContractType, action: Option<&str>, config: &ConverterConfig) -> Self {
    Self {
      type_id: contract_type.type_id(),
      action: action.map(str::to_string),
      namespace: config.resolved_namespace().to_string(),
      format: config.format().clone(),
    }
  }
}

/// Keeps one converter per (type, action, namespace, format) so each is built only once.
#[derive(Debug, Clone, Default)]
pub struct ConverterCache {
  factory: ConverterFactory,
  converters: Arc<DashMap<ConverterKey, TypedMessageConverter>>,
}

impl ConverterCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_factory(factory: ConverterFactory) -> Self {
    Self {
      factory,
      converters: Arc::new(DashMap::new()),
    }
  }

  /// Returns the cached converter for the key, building it on first use.
  ///
  /// Failed builds are not cached.
  pub fn get_or_create(
    &self,
    contract_type: Option<&ContractType>,
    action: Option<&str>,
    config: &ConverterConfig,
  ) -> Result<TypedMessageConverter, ConverterError> {
    let contract_type = contract_type.ok_or(ConverterError::ArgumentMissing("contract_type"))?;
    let key = ConverterKey::new(contract_type, action, config);
    if let Some(converter) = self.converters.get(&key) {
      tracing::trace!("ConverterCache: hit: type = {}, action = {:?}", contract_type.type_name(), action);
      return Ok(converter.value().clone());
    }
    tracing::debug!("ConverterCache: miss: type = {}, action = {:?}", contract_type.type_name(), action);
    let converter = self.factory.create(Some(contract_type), action, config)?;
    Ok(self.converters.entry(key).or_insert(converter).value().clone())
  }

  pub fn len(&self) -> usize {
    self.converters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.converters.is_empty()
  }

  pub fn clear(&self) {
    self.converters.clear();
  }
}

static_assertions::assert_impl_all!(ConverterCache: Send, Sync);
