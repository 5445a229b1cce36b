use crate::converter::{ConverterConfig, ConverterError, ConverterFactory};
use crate::description::{CodecError, ContractType, ContractValue, MessageContract};
use crate::formatter::{FormatterError, OperationFormatter};
use crate::message::{Envelope, MessageVersion};
use std::any::Any;
use std::sync::Arc;

/// Converts one message contract type to and from [`Envelope`]s.
///
/// Built once per (type, action, namespace, format) and reused; conversions do
/// not mutate the converter, so clones can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct TypedMessageConverter {
  formatter: Arc<dyn OperationFormatter>,
}

impl TypedMessageConverter {
  pub fn create(
    contract_type: Option<&ContractType>,
    action: Option<&str>,
    config: &ConverterConfig,
  ) -> Result<Self, ConverterError> {
    ConverterFactory::new().create(contract_type, action, config)
  }

  pub fn for_type<T: MessageContract>(action: Option<&str>, config: &ConverterConfig) -> Result<Self, ConverterError> {
    Self::create(Some(&ContractType::of::<T>()), action, config)
  }

  pub fn from_formatter(formatter: Arc<dyn OperationFormatter>) -> Self {
    Self { formatter }
  }

  /// Routing action this converter writes and accepts.
  pub fn action(&self) -> Option<&str> {
    self.formatter.request_action()
  }

  pub fn to_message(&self, typed_message: Option<&dyn Any>) -> Result<Envelope, ConverterError> {
    self.to_message_with_version(typed_message, MessageVersion::SOAP12_WS_ADDRESSING10)
  }

  pub fn to_message_with_version(
    &self,
    typed_message: Option<&dyn Any>,
    version: MessageVersion,
  ) -> Result<Envelope, ConverterError> {
    let typed_message = typed_message.ok_or(ConverterError::ArgumentMissing("typed_message"))?;
    tracing::trace!("to_message: action = {:?}, version = {}", self.action(), version);
    Ok(self.formatter.serialize_request(version, &[typed_message])?)
  }

  /// Reads the typed message out of `envelope`.
  ///
  /// An envelope addressed to a different action is rejected before its body
  /// is looked at. The check is skipped when either side has no action.
  pub fn from_message(&self, envelope: &Envelope) -> Result<ContractValue, ConverterError> {
    if let (Some(expected), Some(actual)) = (self.action(), envelope.headers().action()) {
      if expected != actual {
        tracing::debug!("from_message: action mismatch: expected = {}, actual = {}", expected, actual);
        return Err(ConverterError::ActionMismatch {
          expected: expected.to_string(),
          actual: actual.to_string(),
        });
      }
    }
    tracing::trace!("from_message: action = {:?}", envelope.headers().action());
    Ok(self.formatter.deserialize_request(envelope)?)
  }

  pub fn encode<T: MessageContract>(&self, typed_message: &T) -> Result<Envelope, ConverterError> {
    self.to_message(Some(typed_message as &dyn Any))
  }

  pub fn decode<T: MessageContract>(&self, envelope: &Envelope) -> Result<T, ConverterError> {
    let value = self.from_message(envelope)?;
    value.downcast::<T>().map(|value| *value).map_err(|_| {
      ConverterError::Formatter(FormatterError::Codec(CodecError::TypeMismatch {
        expected: std::any::type_name::<T>(),
      }))
    })
  }
}

static_assertions::assert_impl_all!(TypedMessageConverter: Send, Sync);
