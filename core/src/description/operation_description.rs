use crate::description::MessageDescription;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDescription {
  name: String,
  namespace: String,
}

impl ContractDescription {
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

/// An operation of a contract together with the messages it exchanges.
///
/// The first message is the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescription {
  name: String,
  contract: ContractDescription,
  is_one_way: bool,
  messages: Vec<MessageDescription>,
}

impl OperationDescription {
  pub fn new(name: impl Into<String>, contract: ContractDescription, is_one_way: bool) -> Self {
    Self {
      name: name.into(),
      contract,
      is_one_way,
      messages: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn contract(&self) -> &ContractDescription {
    &self.contract
  }

  pub fn is_one_way(&self) -> bool {
    self.is_one_way
  }

  pub fn messages(&self) -> &[MessageDescription] {
    &self.messages
  }

  pub fn push_message(&mut self, message: MessageDescription) {
    self.messages.push(message);
  }

  pub fn request_message(&self) -> Option<&MessageDescription> {
    self.messages.first()
  }
}
