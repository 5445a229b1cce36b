use crate::description::{CodecError, ContractType, ContractValue, OperationDescription};
use crate::formatter::OperationFormatStyle;
use crate::message::{Envelope, MessageVersion, QualifiedName};
use std::any::Any;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatterError {
  #[error("operation {0} has no request message")]
  NoRequestMessage(String),
  #[error("request message of operation {0} is not a typed message")]
  MissingMessageType(String),
  #[error("unsupported format: {0}")]
  UnsupportedFormat(String),
  #[error("expected {expected} parameter(s), got {actual}")]
  ParameterCount { expected: usize, actual: usize },
  #[error("unexpected body: expected {expected}, found {actual}")]
  UnexpectedBody { expected: String, actual: String },
  #[error("message body is empty")]
  EmptyBody,
  #[error(transparent)]
  Codec(#[from] CodecError),
}

/// Serializes operation parameters into envelopes and back.
///
/// Implementations are immutable once built and shared across threads.
pub trait OperationFormatter: Debug + Send + Sync {
  fn request_action(&self) -> Option<&str>;

  fn serialize_request(&self, version: MessageVersion, parameters: &[&dyn Any]) -> Result<Envelope, FormatterError>;

  fn deserialize_request(&self, envelope: &Envelope) -> Result<ContractValue, FormatterError>;
}

/// A body part as it appears on the wire, together with the field it carries.
#[derive(Debug, Clone)]
pub(crate) struct BodyPart {
  pub(crate) member: String,
  pub(crate) name: QualifiedName,
}

/// What both formatters need to know about the request of a typed operation.
#[derive(Debug, Clone)]
pub(crate) struct RequestShape {
  pub(crate) action: Option<String>,
  pub(crate) message_type: ContractType,
  pub(crate) style: OperationFormatStyle,
  pub(crate) operation: QualifiedName,
  pub(crate) wrapper: Option<QualifiedName>,
  pub(crate) parts: Vec<BodyPart>,
}

impl RequestShape {
  pub(crate) fn of(operation: &OperationDescription, style: OperationFormatStyle) -> Result<Self, FormatterError> {
    let request = operation
      .request_message()
      .ok_or_else(|| FormatterError::NoRequestMessage(operation.name().to_string()))?;
    let message_type = request
      .message_type()
      .cloned()
      .ok_or_else(|| FormatterError::MissingMessageType(operation.name().to_string()))?;
    let contract_namespace = operation.contract().namespace();
    let body = request.body();
    let wrapper = body.wrapper_name().map(|name| {
      let namespace = body.wrapper_namespace().unwrap_or(contract_namespace);
      QualifiedName::new(name, namespace)
    });
    let parts = body
      .parts()
      .iter()
      .map(|part| BodyPart {
        member: part.member().to_string(),
        name: QualifiedName::new(part.name(), part.namespace()),
      })
      .collect();
    Ok(Self {
      action: request.action().map(str::to_string),
      message_type,
      style,
      operation: QualifiedName::new(operation.name(), contract_namespace),
      wrapper,
      parts,
    })
  }

  /// Outermost body element: the operation element in rpc style, the wrapper otherwise.
  pub(crate) fn root(&self) -> Option<QualifiedName> {
    match self.style {
      OperationFormatStyle::Rpc => Some(self.operation.clone()),
      OperationFormatStyle::Document => self.wrapper.clone(),
    }
  }

  /// Elements enclosing the parts, outermost first.
  pub(crate) fn frames(&self) -> Vec<QualifiedName> {
    let mut frames = Vec::with_capacity(2);
    if self.style == OperationFormatStyle::Rpc {
      frames.push(self.operation.clone());
    }
    frames.extend(self.wrapper.clone());
    frames
  }

  pub(crate) fn part_for_member(&self, member: &str) -> Option<&BodyPart> {
    self.parts.iter().find(|part| part.member == member)
  }

  pub(crate) fn part_named(&self, name: &str) -> Option<&BodyPart> {
    self.parts.iter().find(|part| part.name.name() == name)
  }
}

pub(crate) fn single_parameter<'a>(parameters: &[&'a dyn Any]) -> Result<&'a dyn Any, FormatterError> {
  match parameters {
    [parameter] => Ok(*parameter),
    _ => Err(FormatterError::ParameterCount {
      expected: 1,
      actual: parameters.len(),
    }),
  }
}

pub(crate) fn describe_root(root: Option<&QualifiedName>) -> String {
  root.map_or_else(|| "unwrapped body".to_string(), |root| root.to_string())
}
