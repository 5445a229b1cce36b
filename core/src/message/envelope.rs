use crate::message::{MessageBody, MessageHeaders, MessageVersion};

/// Generic message exchanged with the transport: version, headers and an opaque body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
  version: MessageVersion,
  headers: MessageHeaders,
  body: MessageBody,
}

impl Envelope {
  pub fn new(version: MessageVersion, body: MessageBody) -> Self {
    Self {
      version,
      headers: MessageHeaders::new(),
      body,
    }
  }

  pub fn with_action(mut self, action: impl Into<String>) -> Self {
    self.headers.set_action(Some(action.into()));
    self
  }

  pub fn version(&self) -> MessageVersion {
    self.version
  }

  pub fn headers(&self) -> &MessageHeaders {
    &self.headers
  }

  pub fn headers_mut(&mut self) -> &mut MessageHeaders {
    &mut self.headers
  }

  pub fn body(&self) -> &MessageBody {
    &self.body
  }

  pub fn is_empty(&self) -> bool {
    self.body.is_empty()
  }
}
