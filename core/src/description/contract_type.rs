use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

/// Type-erased value produced by deserializing a message contract.
pub type ContractValue = Box<dyn Any + Send + Sync>;

/// Marker declaring a type as a message contract, with its wrapper settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageContractAttribute {
  pub wrapper_name: Option<String>,
  pub wrapper_namespace: Option<String>,
  pub is_wrapped: bool,
}

impl MessageContractAttribute {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_wrapper_name(mut self, wrapper_name: impl Into<String>) -> Self {
    self.wrapper_name = Some(wrapper_name.into());
    self
  }

  pub fn with_wrapper_namespace(mut self, wrapper_namespace: impl Into<String>) -> Self {
    self.wrapper_namespace = Some(wrapper_namespace.into());
    self
  }

  pub fn with_is_wrapped(mut self, is_wrapped: bool) -> Self {
    self.is_wrapped = is_wrapped;
    self
  }
}

impl Default for MessageContractAttribute {
  fn default() -> Self {
    Self {
      wrapper_name: None,
      wrapper_namespace: None,
      is_wrapped: true,
    }
  }
}

/// A field of a message contract that is carried in the message body.
///
/// `member` is the serialized field name; `name` is the element written on the
/// wire and defaults to `member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyMemberDescription {
  pub member: String,
  pub name: String,
  pub namespace: Option<String>,
  pub order: i32,
  pub type_name: &'static str,
}

impl BodyMemberDescription {
  pub fn new(member: impl Into<String>, type_name: &'static str) -> Self {
    let member = member.into();
    Self {
      name: member.clone(),
      member,
      namespace: None,
      order: 0,
      type_name,
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
    self.namespace = Some(namespace.into());
    self
  }

  pub fn with_order(mut self, order: i32) -> Self {
    self.order = order;
    self
  }
}

/// Application type usable as the single parameter of a typed message.
///
/// Usually implemented with `#[derive(MessageContract)]`. Types that return
/// `None` from [`MessageContract::message_contract`] can only be converted
/// with the XML serializer format.
pub trait MessageContract: Serialize + DeserializeOwned + Send + Sync + 'static {
  fn message_contract() -> Option<MessageContractAttribute> {
    None
  }

  fn body_members() -> Vec<BodyMemberDescription>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
  #[error("value is not of the contract type {expected}")]
  TypeMismatch { expected: &'static str },
  #[error("encode error: {0}")]
  Encode(String),
  #[error("decode error: {0}")]
  Decode(String),
}

#[derive(Clone, Copy)]
pub(crate) struct ContractCodec {
  pub(crate) to_structured: fn(&dyn Any) -> Result<serde_json::Value, CodecError>,
  pub(crate) from_structured: fn(&serde_json::Value) -> Result<ContractValue, CodecError>,
  pub(crate) from_xml: fn(&str) -> Result<ContractValue, CodecError>,
}

impl ContractCodec {
  fn of<T: MessageContract>() -> Self {
    Self {
      to_structured: to_structured::<T>,
      from_structured: from_structured::<T>,
      from_xml: from_xml::<T>,
    }
  }
}

fn downcast<T: MessageContract>(value: &dyn Any) -> Result<&T, CodecError> {
  value.downcast_ref::<T>().ok_or(CodecError::TypeMismatch {
    expected: std::any::type_name::<T>(),
  })
}

/// Encodes the value as a `serde_json` tree that is known to decode again.
///
/// Non-finite floats become `null` in the tree, so values holding them are
/// rejected here instead of producing a body that cannot be read.
fn to_structured<T: MessageContract>(value: &dyn Any) -> Result<serde_json::Value, CodecError> {
  let content = serde_json::to_value(downcast::<T>(value)?).map_err(|e| CodecError::Encode(e.to_string()))?;
  T::deserialize(&content).map_err(|e| CodecError::Encode(format!("structured form cannot be read back: {}", e)))?;
  Ok(content)
}

fn from_structured<T: MessageContract>(content: &serde_json::Value) -> Result<ContractValue, CodecError> {
  T::deserialize(content)
    .map(|value| Box::new(value) as ContractValue)
    .map_err(|e| CodecError::Decode(e.to_string()))
}

fn from_xml<T: MessageContract>(xml: &str) -> Result<ContractValue, CodecError> {
  quick_xml::de::from_str::<T>(xml)
    .map(|value| Box::new(value) as ContractValue)
    .map_err(|e| CodecError::Decode(e.to_string()))
}

struct ContractTypeInner {
  type_id: TypeId,
  type_name: &'static str,
  short_name: String,
  message_contract: Option<MessageContractAttribute>,
  body_members: Vec<BodyMemberDescription>,
  codec: ContractCodec,
}

/// Runtime descriptor of a [`MessageContract`] type.
///
/// Captured once per type and cheap to clone. Equality and hashing follow the
/// described type's identity.
#[derive(Clone)]
pub struct ContractType {
  inner: Arc<ContractTypeInner>,
}

impl ContractType {
  pub fn of<T: MessageContract>() -> Self {
    let type_name = std::any::type_name::<T>();
    Self {
      inner: Arc::new(ContractTypeInner {
        type_id: TypeId::of::<T>(),
        type_name,
        short_name: short_type_name(type_name).to_string(),
        message_contract: T::message_contract(),
        body_members: T::body_members(),
        codec: ContractCodec::of::<T>(),
      }),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.inner.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.inner.type_name
  }

  /// Last path segment of the type name, without generic arguments.
  pub fn short_name(&self) -> &str {
    &self.inner.short_name
  }

  pub fn message_contract(&self) -> Option<&MessageContractAttribute> {
    self.inner.message_contract.as_ref()
  }

  pub fn is_message_contract(&self) -> bool {
    self.inner.message_contract.is_some()
  }

  pub fn body_members(&self) -> &[BodyMemberDescription] {
    &self.inner.body_members
  }

  pub fn is<T: 'static>(&self) -> bool {
    self.inner.type_id == TypeId::of::<T>()
  }

  pub(crate) fn codec(&self) -> &ContractCodec {
    &self.inner.codec
  }
}

fn short_type_name(type_name: &str) -> &str {
  let path = type_name.split('<').next().unwrap_or(type_name);
  path.rsplit("::").next().unwrap_or(path)
}

impl Debug for ContractType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ContractType")
      .field("type_name", &self.inner.type_name)
      .field("message_contract", &self.inner.message_contract)
      .field("body_members", &self.inner.body_members)
      .finish()
  }
}

impl PartialEq for ContractType {
  fn eq(&self, other: &Self) -> bool {
    self.inner.type_id == other.inner.type_id
  }
}

impl Eq for ContractType {}

impl Hash for ContractType {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.inner.type_id.hash(state);
  }
}

static_assertions::assert_impl_all!(ContractType: Send, Sync);

/// Empty message contract, useful for operations without a body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyContract {}

impl MessageContract for EmptyContract {
  fn message_contract() -> Option<MessageContractAttribute> {
    Some(MessageContractAttribute::default())
  }

  fn body_members() -> Vec<BodyMemberDescription> {
    Vec::new()
  }
}
