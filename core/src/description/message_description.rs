use crate::description::ContractType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum MessageDirection {
  Input,
  Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePartDescription {
  name: String,
  member: String,
  namespace: String,
  index: usize,
  type_name: &'static str,
}

impl MessagePartDescription {
  pub fn new(name: impl Into<String>, namespace: impl Into<String>, type_name: &'static str) -> Self {
    let name = name.into();
    Self {
      member: name.clone(),
      name,
      namespace: namespace.into(),
      index: 0,
      type_name,
    }
  }

  /// Sets the serialized field this part carries; defaults to the part name.
  pub fn with_member(mut self, member: impl Into<String>) -> Self {
    self.member = member.into();
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn member(&self) -> &str {
    &self.member
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  /// Position of the part within the body, after ordering.
  pub fn index(&self) -> usize {
    self.index
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub(crate) fn set_index(&mut self, index: usize) {
    self.index = index;
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBodyDescription {
  wrapper_name: Option<String>,
  wrapper_namespace: Option<String>,
  parts: Vec<MessagePartDescription>,
}

impl MessageBodyDescription {
  pub fn new(
    wrapper_name: Option<String>,
    wrapper_namespace: Option<String>,
    parts: Vec<MessagePartDescription>,
  ) -> Self {
    Self {
      wrapper_name,
      wrapper_namespace,
      parts,
    }
  }

  pub fn wrapper_name(&self) -> Option<&str> {
    self.wrapper_name.as_deref()
  }

  pub fn wrapper_namespace(&self) -> Option<&str> {
    self.wrapper_namespace.as_deref()
  }

  pub fn is_wrapped(&self) -> bool {
    self.wrapper_name.is_some()
  }

  pub fn parts(&self) -> &[MessagePartDescription] {
    &self.parts
  }
}

/// Structural description of one message of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescription {
  action: Option<String>,
  direction: MessageDirection,
  body: MessageBodyDescription,
  message_type: Option<ContractType>,
}

impl MessageDescription {
  pub fn new(action: Option<String>, direction: MessageDirection) -> Self {
    Self {
      action,
      direction,
      body: MessageBodyDescription::default(),
      message_type: None,
    }
  }

  pub fn with_body(mut self, body: MessageBodyDescription) -> Self {
    self.body = body;
    self
  }

  pub fn with_message_type(mut self, message_type: ContractType) -> Self {
    self.message_type = Some(message_type);
    self
  }

  pub fn action(&self) -> Option<&str> {
    self.action.as_deref()
  }

  pub fn direction(&self) -> MessageDirection {
    self.direction
  }

  pub fn body(&self) -> &MessageBodyDescription {
    &self.body
  }

  /// Contract type when the message is a typed message.
  pub fn message_type(&self) -> Option<&ContractType> {
    self.message_type.as_ref()
  }
}
