use crate::description::{is_xml_name, CodecError};
use crate::formatter::operation_formatter::RequestShape;
use crate::formatter::FormatterError;
use crate::message::QualifiedName;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Writes `content` as XML nested in `frames`, the parts of `shape` first and
/// in description order.
///
/// `null` members are left out, so an absent optional reads back as absent.
/// Shapes the XML form cannot carry (empty or nested sequences, names that are
/// not element names) are rejected.
pub(crate) fn write_body(frames: &[QualifiedName], shape: &RequestShape, content: &Value) -> Result<String, CodecError> {
  let innermost = frames
    .last()
    .ok_or_else(|| CodecError::Encode("body has no document element".to_string()))?;
  let mut writer = Writer::new(Vec::new());
  let mut parent_namespace = None;
  for frame in frames {
    start(&mut writer, frame.name(), Some(frame.namespace()), parent_namespace)?;
    parent_namespace = Some(frame.namespace());
  }
  match content {
    Value::Object(fields) => write_parts(&mut writer, shape, innermost.namespace(), fields)?,
    Value::Null => {}
    Value::Array(_) => return Err(CodecError::Encode("a sequence cannot be a message body".to_string())),
    scalar => write_text(&mut writer, scalar)?,
  }
  for frame in frames.iter().rev() {
    end(&mut writer, frame.name())?;
  }
  String::from_utf8(writer.into_inner()).map_err(encode_error)
}

/// Checks the enclosing elements of `xml` against `frames` and returns a
/// document whose root holds the parts under their field names.
///
/// A frame without `xmlns` is matched by name alone.
pub(crate) fn read_body(xml: &str, frames: &[QualifiedName], shape: &RequestShape) -> Result<String, FormatterError> {
  let innermost = frames.len();
  let Some(root) = frames.last() else {
    return Err(decode_error("body has no document element"));
  };
  let mut reader = Reader::from_str(xml);
  let mut writer = Writer::new(Vec::new());
  let mut depth = 0_usize;
  let mut found = false;
  loop {
    match reader.read_event().map_err(decode_error)? {
      Event::Start(element) => {
        depth += 1;
        if depth < innermost {
          expect_frame(&element, &frames[depth - 1])?;
        } else if depth == innermost {
          expect_frame(&element, root)?;
          found = true;
          writer
            .write_event(Event::Start(BytesStart::new(root.name())))
            .map_err(decode_error)?;
        } else {
          let copy = copy_element(&element, shape, depth == innermost + 1)?;
          writer.write_event(Event::Start(copy)).map_err(decode_error)?;
        }
      }
      Event::Empty(element) => {
        if depth + 1 < innermost {
          expect_frame(&element, &frames[depth])?;
          return Err(FormatterError::UnexpectedBody {
            expected: frames[depth + 1].to_string(),
            actual: "no element".to_string(),
          });
        } else if depth + 1 == innermost {
          expect_frame(&element, root)?;
          found = true;
          writer
            .write_event(Event::Empty(BytesStart::new(root.name())))
            .map_err(decode_error)?;
        } else {
          let copy = copy_element(&element, shape, depth == innermost)?;
          writer.write_event(Event::Empty(copy)).map_err(decode_error)?;
        }
      }
      Event::End(element) => {
        if depth == innermost {
          writer.write_event(Event::End(BytesEnd::new(root.name()))).map_err(decode_error)?;
        } else if depth > innermost {
          let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
          let name = match shape.part_named(&name) {
            Some(part) if depth == innermost + 1 => part.member.clone(),
            _ => name,
          };
          writer.write_event(Event::End(BytesEnd::new(name))).map_err(decode_error)?;
        }
        depth = depth.saturating_sub(1);
      }
      Event::Text(text) if depth >= innermost => writer.write_event(Event::Text(text)).map_err(decode_error)?,
      Event::CData(data) if depth >= innermost => writer.write_event(Event::CData(data)).map_err(decode_error)?,
      Event::Eof => break,
      _ => {}
    }
  }
  if !found {
    return Err(FormatterError::UnexpectedBody {
      expected: frames[0].to_string(),
      actual: "no element".to_string(),
    });
  }
  String::from_utf8(writer.into_inner()).map_err(decode_error)
}

fn write_parts(
  writer: &mut Writer<Vec<u8>>,
  shape: &RequestShape,
  namespace: &str,
  fields: &Map<String, Value>,
) -> Result<(), CodecError> {
  for part in &shape.parts {
    if let Some(value) = fields.get(&part.member) {
      write_value(writer, part.name.name(), Some(part.name.namespace()), namespace, value)?;
    }
  }
  for (key, value) in fields {
    if shape.part_for_member(key).is_none() {
      write_value(writer, key, None, namespace, value)?;
    }
  }
  Ok(())
}

fn write_value(
  writer: &mut Writer<Vec<u8>>,
  name: &str,
  namespace: Option<&str>,
  parent_namespace: &str,
  value: &Value,
) -> Result<(), CodecError> {
  match value {
    Value::Null => Ok(()),
    Value::Array(items) if items.is_empty() => Err(CodecError::Encode(format!(
      "empty sequence `{}` has no XML form",
      name
    ))),
    Value::Array(items) => {
      for item in items {
        if matches!(item, Value::Null | Value::Array(_)) {
          return Err(CodecError::Encode(format!(
            "sequence `{}` holds an item without an XML form",
            name
          )));
        }
        write_element(writer, name, namespace, parent_namespace, item)?;
      }
      Ok(())
    }
    _ => write_element(writer, name, namespace, parent_namespace, value),
  }
}

fn write_element(
  writer: &mut Writer<Vec<u8>>,
  name: &str,
  namespace: Option<&str>,
  parent_namespace: &str,
  value: &Value,
) -> Result<(), CodecError> {
  if !is_xml_name(name) {
    return Err(CodecError::Encode(format!("`{}` is not an XML element name", name)));
  }
  start(writer, name, namespace, Some(parent_namespace))?;
  let namespace = namespace.unwrap_or(parent_namespace);
  match value {
    Value::Object(fields) => {
      for (key, field) in fields {
        write_value(writer, key, None, namespace, field)?;
      }
    }
    scalar => write_text(writer, scalar)?,
  }
  end(writer, name)
}

fn write_text(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<(), CodecError> {
  let text = match value {
    Value::String(text) => escape_text(text),
    Value::Bool(flag) => flag.to_string(),
    Value::Number(number) => number.to_string(),
    _ => String::new(),
  };
  if text.is_empty() {
    return Ok(());
  }
  writer
    .write_event(Event::Text(BytesText::from_escaped(text)))
    .map_err(encode_error)
}

fn start(
  writer: &mut Writer<Vec<u8>>,
  name: &str,
  namespace: Option<&str>,
  parent_namespace: Option<&str>,
) -> Result<(), CodecError> {
  let mut element = BytesStart::new(name);
  if let Some(namespace) = namespace.filter(|namespace| Some(*namespace) != parent_namespace) {
    element.push_attribute(("xmlns", namespace));
  }
  writer.write_event(Event::Start(element)).map_err(encode_error)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), CodecError> {
  writer.write_event(Event::End(BytesEnd::new(name))).map_err(encode_error)
}

/// Escapes markup. Leading and trailing whitespace is written as character
/// references, which survive readers that trim text.
fn escape_text(text: &str) -> String {
  let leading = text.len() - text.trim_start().len();
  let trailing = text.trim_end().len();
  let mut escaped = String::with_capacity(text.len());
  for (index, ch) in text.char_indices() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '\r' => escaped.push_str("&#xD;"),
      ch if ch.is_whitespace() && (index < leading || index >= trailing) => {
        escaped.push_str(&format!("&#x{:X};", ch as u32));
      }
      ch => escaped.push(ch),
    }
  }
  escaped
}

fn expect_frame(element: &BytesStart, frame: &QualifiedName) -> Result<(), FormatterError> {
  let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
  let mut namespace = None;
  for attribute in element.attributes() {
    let attribute = attribute.map_err(decode_error)?;
    if attribute.key.as_ref() == b"xmlns" {
      namespace = Some(attribute.unescape_value().map_err(decode_error)?.into_owned());
    }
  }
  let namespace_matches = namespace.as_deref().map_or(true, |namespace| namespace == frame.namespace());
  if name == frame.name() && namespace_matches {
    Ok(())
  } else {
    Err(FormatterError::UnexpectedBody {
      expected: frame.to_string(),
      actual: QualifiedName::new(name, namespace.unwrap_or_default()).to_string(),
    })
  }
}

/// Copies `element` without namespace declarations, renaming a part to its field.
fn copy_element(element: &BytesStart, shape: &RequestShape, is_part: bool) -> Result<BytesStart<'static>, FormatterError> {
  let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
  let name = match shape.part_named(&name) {
    Some(part) if is_part => part.member.clone(),
    _ => name,
  };
  let mut copy = BytesStart::new(name);
  for attribute in element.attributes() {
    let attribute = attribute.map_err(decode_error)?;
    let key = attribute.key.as_ref();
    if key != b"xmlns" && !key.starts_with(b"xmlns:") {
      copy.push_attribute(attribute);
    }
  }
  Ok(copy)
}

fn encode_error(error: impl Display) -> CodecError {
  CodecError::Encode(error.to_string())
}

fn decode_error(error: impl Display) -> FormatterError {
  FormatterError::Codec(CodecError::Decode(error.to_string()))
}
