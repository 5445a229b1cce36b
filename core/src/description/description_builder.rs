use crate::description::{
  xml_name, ContractType, MessageBodyDescription, MessageDescription, MessageDirection, MessagePartDescription,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
  #[error("{type_name} declares an empty wrapper name")]
  InvalidWrapperName { type_name: &'static str },
  #[error("{type_name} declares a body member without a name")]
  InvalidPartName { type_name: &'static str },
  #[error("{type_name} declares more than one body part named {{{namespace}}}{name}")]
  DuplicatePart {
    type_name: &'static str,
    name: String,
    namespace: String,
  },
}

/// Explicit values that take precedence over what the contract type declares.
#[derive(Debug, Clone, Default)]
pub struct DescriptionOverrides {
  pub parts: Option<Vec<MessagePartDescription>>,
  pub action: Option<String>,
}

/// Derives [`MessageDescription`]s from contract types.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageDescriptionBuilder;

impl MessageDescriptionBuilder {
  pub fn new() -> Self {
    Self
  }

  pub fn build(
    &self,
    contract_type: &ContractType,
    overrides: &DescriptionOverrides,
    default_namespace: &str,
    action: Option<&str>,
    direction: MessageDirection,
  ) -> Result<MessageDescription, DescriptionError> {
    let type_name = contract_type.type_name();
    let attribute = contract_type.message_contract().cloned().unwrap_or_default();

    let wrapper_namespace = attribute
      .wrapper_namespace
      .clone()
      .unwrap_or_else(|| default_namespace.to_string());
    let wrapper_name = if attribute.is_wrapped {
      match attribute.wrapper_name.as_deref() {
        Some("") => return Err(DescriptionError::InvalidWrapperName { type_name }),
        Some(name) => Some(xml_name(name)),
        None => Some(xml_name(contract_type.short_name())),
      }
    } else {
      None
    };

    let mut parts = match &overrides.parts {
      Some(parts) => parts.clone(),
      None => {
        let mut members = contract_type.body_members().to_vec();
        members.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        members
          .into_iter()
          .map(|member| {
            let namespace = member.namespace.unwrap_or_else(|| wrapper_namespace.clone());
            MessagePartDescription::new(xml_name(&member.name), namespace, member.type_name).with_member(member.member)
          })
          .collect::<Vec<_>>()
      }
    };

    for (index, part) in parts.iter_mut().enumerate() {
      if part.name().is_empty() {
        return Err(DescriptionError::InvalidPartName { type_name });
      }
      part.set_index(index);
    }
    for (index, part) in parts.iter().enumerate() {
      let duplicated = parts[..index]
        .iter()
        .any(|seen| seen.name() == part.name() && seen.namespace() == part.namespace());
      if duplicated {
        return Err(DescriptionError::DuplicatePart {
          type_name,
          name: part.name().to_string(),
          namespace: part.namespace().to_string(),
        });
      }
    }

    let action = overrides.action.clone().or_else(|| action.map(str::to_string));
    let wrapper_namespace = wrapper_name.as_ref().map(|_| wrapper_namespace);
    tracing::trace!(
      "built message description: type = {}, action = {:?}, wrapper = {:?}, parts = {}",
      type_name,
      action,
      wrapper_name,
      parts.len()
    );
    Ok(
      MessageDescription::new(action, direction)
        .with_body(MessageBodyDescription::new(wrapper_name, wrapper_namespace, parts))
        .with_message_type(contract_type.clone()),
    )
  }
}
