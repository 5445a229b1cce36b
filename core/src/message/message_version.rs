use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum EnvelopeVersion {
  #[strum(serialize = "EnvelopeNone")]
  None,
  #[strum(serialize = "Soap11")]
  Soap11,
  #[strum(serialize = "Soap12")]
  Soap12,
}

impl EnvelopeVersion {
  pub fn namespace(&self) -> Option<&'static str> {
    match self {
      EnvelopeVersion::None => None,
      EnvelopeVersion::Soap11 => Some("http://schemas.xmlsoap.org/soap/envelope/"),
      EnvelopeVersion::Soap12 => Some("http://www.w3.org/2003/05/soap-envelope"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum AddressingVersion {
  #[strum(serialize = "AddressingNone")]
  None,
  #[strum(serialize = "WSAddressingAugust2004")]
  WsAddressingAugust2004,
  #[strum(serialize = "WSAddressing10")]
  WsAddressing10,
}

impl AddressingVersion {
  pub fn namespace(&self) -> Option<&'static str> {
    match self {
      AddressingVersion::None => None,
      AddressingVersion::WsAddressingAugust2004 => Some("http://schemas.xmlsoap.org/ws/2004/08/addressing"),
      AddressingVersion::WsAddressing10 => Some("http://www.w3.org/2005/08/addressing"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("addressing version {addressing} requires a SOAP envelope")]
pub struct MessageVersionError {
  pub addressing: AddressingVersion,
}

/// Envelope and addressing protocol pair an [`Envelope`](crate::message::Envelope) is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageVersion {
  envelope: EnvelopeVersion,
  addressing: AddressingVersion,
}

impl MessageVersion {
  pub const NONE: Self = Self::new(EnvelopeVersion::None, AddressingVersion::None);
  pub const SOAP11: Self = Self::new(EnvelopeVersion::Soap11, AddressingVersion::None);
  pub const SOAP11_WS_ADDRESSING10: Self = Self::new(EnvelopeVersion::Soap11, AddressingVersion::WsAddressing10);
  pub const SOAP11_WS_ADDRESSING_AUGUST2004: Self =
    Self::new(EnvelopeVersion::Soap11, AddressingVersion::WsAddressingAugust2004);
  pub const SOAP12: Self = Self::new(EnvelopeVersion::Soap12, AddressingVersion::None);
  pub const SOAP12_WS_ADDRESSING10: Self = Self::new(EnvelopeVersion::Soap12, AddressingVersion::WsAddressing10);
  pub const SOAP12_WS_ADDRESSING_AUGUST2004: Self =
    Self::new(EnvelopeVersion::Soap12, AddressingVersion::WsAddressingAugust2004);

  const fn new(envelope: EnvelopeVersion, addressing: AddressingVersion) -> Self {
    Self { envelope, addressing }
  }

  /// Combines an envelope and an addressing version.
  ///
  /// Addressing headers live in the SOAP header block, so an addressed version
  /// without an envelope is rejected.
  pub fn create(envelope: EnvelopeVersion, addressing: AddressingVersion) -> Result<Self, MessageVersionError> {
    if envelope == EnvelopeVersion::None && addressing != AddressingVersion::None {
      return Err(MessageVersionError { addressing });
    }
    Ok(Self::new(envelope, addressing))
  }

  pub fn envelope(&self) -> EnvelopeVersion {
    self.envelope
  }

  pub fn addressing(&self) -> AddressingVersion {
    self.addressing
  }
}

impl Default for MessageVersion {
  fn default() -> Self {
    MessageVersion::SOAP12_WS_ADDRESSING10
  }
}

impl Display for MessageVersion {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.envelope, self.addressing)
  }
}
