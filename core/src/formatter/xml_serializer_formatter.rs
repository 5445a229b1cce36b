use crate::description::{xml_name, CodecError, ContractValue, OperationDescription};
use crate::formatter::operation_formatter::{single_parameter, RequestShape};
use crate::formatter::xml_body::{read_body, write_body};
use crate::formatter::{FormatterError, OperationFormatStyle, OperationFormatUse, OperationFormatter, XmlSerializerFormat};
use crate::message::{Envelope, MessageBody, MessageVersion, QualifiedName};
use std::any::Any;

/// Mapping-based formatter: the body is XML text read back through `quick-xml`'s serde support.
///
/// Parts are written in description order under their described names. In rpc
/// style the body is enclosed in the operation element.
#[derive(Debug, Clone)]
pub struct XmlSerializerOperationFormatter {
  operation_name: String,
  format: XmlSerializerFormat,
  shape: RequestShape,
  frames: Vec<QualifiedName>,
}

impl XmlSerializerOperationFormatter {
  pub fn build(operation: &OperationDescription, format: &XmlSerializerFormat) -> Result<Self, FormatterError> {
    if format.style == OperationFormatStyle::Document && format.format_use == OperationFormatUse::Encoded {
      return Err(FormatterError::UnsupportedFormat(format!(
        "operation {} uses {} style with {} encoding",
        operation.name(),
        format.style,
        format.format_use
      )));
    }
    let shape = RequestShape::of(operation, format.style)?;
    let mut frames = shape.frames();
    // Unwrapped document bodies still need a document element.
    if frames.is_empty() {
      frames.push(QualifiedName::new(
        xml_name(shape.message_type.short_name()),
        operation.contract().namespace(),
      ));
    }
    tracing::debug!(
      "XmlSerializerOperationFormatter: operation = {}, style = {}, use = {}, root = {}",
      operation.name(),
      format.style,
      format.format_use,
      frames[0]
    );
    Ok(Self {
      operation_name: operation.name().to_string(),
      format: format.clone(),
      shape,
      frames,
    })
  }

  pub fn operation_name(&self) -> &str {
    &self.operation_name
  }

  pub fn format(&self) -> &XmlSerializerFormat {
    &self.format
  }

  fn root(&self) -> &QualifiedName {
    &self.frames[0]
  }

  fn decode(&self, xml: &str) -> Result<ContractValue, FormatterError> {
    let document = read_body(xml, &self.frames, &self.shape)?;
    Ok((self.shape.message_type.codec().from_xml)(&document)?)
  }
}

impl OperationFormatter for XmlSerializerOperationFormatter {
  fn request_action(&self) -> Option<&str> {
    self.shape.action.as_deref()
  }

  fn serialize_request(&self, version: MessageVersion, parameters: &[&dyn Any]) -> Result<Envelope, FormatterError> {
    let parameter = single_parameter(parameters)?;
    let content = (self.shape.message_type.codec().to_structured)(parameter)?;
    let xml = write_body(&self.frames, &self.shape, &content)?;
    self
      .decode(&xml)
      .map_err(|e| CodecError::Encode(format!("XML form cannot be read back: {}", e)))?;
    let mut envelope = Envelope::new(
      version,
      MessageBody::Xml {
        root: self.root().clone(),
        xml,
      },
    );
    envelope.headers_mut().set_action(self.shape.action.clone());
    Ok(envelope)
  }

  fn deserialize_request(&self, envelope: &Envelope) -> Result<ContractValue, FormatterError> {
    match envelope.body() {
      MessageBody::Xml { root, xml } if root == self.root() => self.decode(xml),
      MessageBody::Xml { root, .. } => Err(FormatterError::UnexpectedBody {
        expected: self.root().to_string(),
        actual: root.to_string(),
      }),
      MessageBody::Empty => Err(FormatterError::EmptyBody),
      other => Err(FormatterError::UnexpectedBody {
        expected: "xml body".to_string(),
        actual: format!("{} body", other.kind()),
      }),
    }
  }
}
