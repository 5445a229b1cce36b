use crate::description::{ContractValue, OperationDescription};
use crate::formatter::operation_formatter::{describe_root, single_parameter, RequestShape};
use crate::formatter::{DataContractFormat, FormatterError, OperationFormatStyle, OperationFormatter};
use crate::message::{Envelope, MessageBody, MessageVersion, QualifiedName};
use serde_json::{Map, Value};
use std::any::Any;

/// Structural formatter: the body is a `serde_json` tree of the contract value.
///
/// Parts are keyed by their described names. In rpc style the tree sits under
/// the operation element, with a wrapped contract nested under its wrapper name.
#[derive(Debug, Clone)]
pub struct DataContractOperationFormatter {
  operation_name: String,
  format: DataContractFormat,
  shape: RequestShape,
}

impl DataContractOperationFormatter {
  /// Builds the formatter for `operation`; `wrapper_override` replaces the
  /// described wrapper element.
  pub fn new(
    operation: &OperationDescription,
    format: &DataContractFormat,
    wrapper_override: Option<QualifiedName>,
  ) -> Result<Self, FormatterError> {
    let mut shape = RequestShape::of(operation, format.style)?;
    if wrapper_override.is_some() {
      shape.wrapper = wrapper_override;
    }
    tracing::debug!(
      "DataContractOperationFormatter: operation = {}, style = {}, root = {}",
      operation.name(),
      format.style,
      describe_root(shape.root().as_ref())
    );
    Ok(Self {
      operation_name: operation.name().to_string(),
      format: format.clone(),
      shape,
    })
  }

  pub fn operation_name(&self) -> &str {
    &self.operation_name
  }

  pub fn format(&self) -> &DataContractFormat {
    &self.format
  }

  fn to_wire(&self, content: Value) -> Value {
    let content = match content {
      Value::Object(fields) => Value::Object(
        fields
          .into_iter()
          .map(|(key, value)| match self.shape.part_for_member(&key) {
            Some(part) => (part.name.name().to_string(), value),
            None => (key, value),
          })
          .collect(),
      ),
      other => other,
    };
    match (&self.format.style, &self.shape.wrapper) {
      (OperationFormatStyle::Rpc, Some(wrapper)) => {
        let mut outer = Map::new();
        outer.insert(wrapper.name().to_string(), content);
        Value::Object(outer)
      }
      _ => content,
    }
  }

  fn from_wire(&self, content: &Value) -> Result<Value, FormatterError> {
    let content = match (&self.format.style, &self.shape.wrapper) {
      (OperationFormatStyle::Rpc, Some(wrapper)) => {
        content
          .get(wrapper.name())
          .ok_or_else(|| FormatterError::UnexpectedBody {
            expected: wrapper.to_string(),
            actual: "no wrapper member".to_string(),
          })?
      }
      _ => content,
    };
    Ok(match content {
      Value::Object(fields) => Value::Object(
        fields
          .iter()
          .map(|(key, value)| match self.shape.part_named(key) {
            Some(part) => (part.member.clone(), value.clone()),
            None => (key.clone(), value.clone()),
          })
          .collect(),
      ),
      other => other.clone(),
    })
  }
}

impl OperationFormatter for DataContractOperationFormatter {
  fn request_action(&self) -> Option<&str> {
    self.shape.action.as_deref()
  }

  fn serialize_request(&self, version: MessageVersion, parameters: &[&dyn Any]) -> Result<Envelope, FormatterError> {
    let parameter = single_parameter(parameters)?;
    let content = (self.shape.message_type.codec().to_structured)(parameter)?;
    let mut envelope = Envelope::new(
      version,
      MessageBody::Structured {
        root: self.shape.root(),
        content: self.to_wire(content),
      },
    );
    envelope.headers_mut().set_action(self.shape.action.clone());
    Ok(envelope)
  }

  fn deserialize_request(&self, envelope: &Envelope) -> Result<ContractValue, FormatterError> {
    let expected = self.shape.root();
    match envelope.body() {
      MessageBody::Structured { root, content } if *root == expected => {
        let content = self.from_wire(content)?;
        Ok((self.shape.message_type.codec().from_structured)(&content)?)
      }
      MessageBody::Structured { root, .. } => Err(FormatterError::UnexpectedBody {
        expected: describe_root(expected.as_ref()),
        actual: describe_root(root.as_ref()),
      }),
      MessageBody::Empty => Err(FormatterError::EmptyBody),
      other => Err(FormatterError::UnexpectedBody {
        expected: "structured body".to_string(),
        actual: format!("{} body", other.kind()),
      }),
    }
  }
}
