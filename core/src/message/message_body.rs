use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
  name: String,
  namespace: String,
}

impl QualifiedName {
  pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      namespace: namespace.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }
}

impl Display for QualifiedName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}{}", self.namespace, self.name)
  }
}

/// Body storage of an [`Envelope`](crate::message::Envelope).
///
/// The content is only meaningful to the formatter that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
  Empty,
  /// Structural body; `root` is `None` for unwrapped contracts.
  Structured {
    root: Option<QualifiedName>,
    content: serde_json::Value,
  },
  /// XML text whose document element is `root`.
  Xml { root: QualifiedName, xml: String },
}

impl MessageBody {
  pub fn is_empty(&self) -> bool {
    matches!(self, MessageBody::Empty)
  }

  pub fn kind(&self) -> &'static str {
    match self {
      MessageBody::Empty => "empty",
      MessageBody::Structured { .. } => "structured",
      MessageBody::Xml { .. } => "xml",
    }
  }
}

impl Default for MessageBody {
  fn default() -> Self {
    MessageBody::Empty
  }
}
