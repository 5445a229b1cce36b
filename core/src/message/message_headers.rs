/// Header entry carried alongside the addressing headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
  pub name: String,
  pub namespace: String,
  pub value: String,
}

impl MessageHeader {
  pub fn new(name: impl Into<String>, namespace: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      namespace: namespace.into(),
      value: value.into(),
    }
  }
}

/// Header section of an [`Envelope`](crate::message::Envelope).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHeaders {
  action: Option<String>,
  to: Option<String>,
  headers: Vec<MessageHeader>,
}

impl MessageHeaders {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn action(&self) -> Option<&str> {
    self.action.as_deref()
  }

  pub fn set_action(&mut self, action: Option<String>) {
    self.action = action;
  }

  pub fn to(&self) -> Option<&str> {
    self.to.as_deref()
  }

  pub fn set_to(&mut self, to: Option<String>) {
    self.to = to;
  }

  pub fn push(&mut self, header: MessageHeader) {
    self.headers.push(header);
  }

  pub fn find(&self, name: &str, namespace: &str) -> Option<&MessageHeader> {
    self
      .headers
      .iter()
      .find(|header| header.name == name && header.namespace == namespace)
  }

  pub fn iter(&self) -> impl Iterator<Item = &MessageHeader> {
    self.headers.iter()
  }

  /// Number of custom headers, not counting action and `to`.
  pub fn len(&self) -> usize {
    self.headers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.headers.is_empty()
  }
}
