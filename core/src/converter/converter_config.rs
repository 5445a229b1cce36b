use crate::converter::ConverterConfigOption;
use crate::description::DEFAULT_NAMESPACE;
use crate::formatter::{FormatOption, FormatterStrategy};

/// Construction settings of a [`TypedMessageConverter`](crate::converter::TypedMessageConverter).
///
/// Unset fields are resolved when the converter is built: the namespace falls
/// back to [`DEFAULT_NAMESPACE`] and the format to the data contract strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConverterConfig {
  namespace: Option<String>,
  format: FormatOption,
}

impl ConverterConfig {
  pub fn from_options(options: impl IntoIterator<Item = ConverterConfigOption>) -> ConverterConfig {
    let mut config = ConverterConfig::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
    self.namespace = Some(namespace.into());
    self
  }

  pub fn with_format(mut self, format: impl Into<FormatOption>) -> Self {
    self.format = format.into();
    self
  }

  pub fn namespace(&self) -> Option<&str> {
    self.namespace.as_deref()
  }

  pub fn set_namespace(&mut self, namespace: Option<String>) {
    self.namespace = namespace;
  }

  pub fn resolved_namespace(&self) -> &str {
    self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
  }

  pub fn format(&self) -> &FormatOption {
    &self.format
  }

  pub fn set_format(&mut self, format: FormatOption) {
    self.format = format;
  }

  pub fn strategy(&self) -> FormatterStrategy {
    self.format.strategy()
  }
}
