use crate::converter::{ConverterConfig, ConverterError, TypedMessageConverter};
use crate::description::{
  xml_name, ContractDescription, ContractType, DescriptionOverrides, MessageDescriptionBuilder, MessageDirection,
  OperationDescription,
};
use crate::formatter::{
  DataContractOperationFormatter, FormatOption, OperationFormatter, XmlSerializerOperationFormatter,
};
use std::sync::Arc;

/// Name of the contract that wraps the single operation of a converter.
pub const SYNTHETIC_CONTRACT_NAME: &str = "typed_message_contract";

/// Builds [`TypedMessageConverter`]s, one formatter per contract type.
#[derive(Debug, Clone, Default)]
pub struct ConverterFactory {
  description_builder: MessageDescriptionBuilder,
}

impl ConverterFactory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn create(
    &self,
    contract_type: Option<&ContractType>,
    action: Option<&str>,
    config: &ConverterConfig,
  ) -> Result<TypedMessageConverter, ConverterError> {
    let contract_type = contract_type.ok_or(ConverterError::ArgumentMissing("contract_type"))?;
    let format = config.format();
    if matches!(format, FormatOption::DataContract(_)) && !contract_type.is_message_contract() {
      return Err(ConverterError::ArgumentInvalid {
        argument: "contract_type",
        reason: format!(
          "{} must be declared as a message contract to use the data contract format",
          contract_type.type_name()
        ),
      });
    }
    let namespace = config.resolved_namespace();

    let message = self.description_builder.build(
      contract_type,
      &DescriptionOverrides::default(),
      namespace,
      action,
      MessageDirection::Output,
    )?;
    let contract = ContractDescription::new(SYNTHETIC_CONTRACT_NAME, namespace);
    let mut operation = OperationDescription::new(xml_name(contract_type.short_name()), contract, false);
    operation.push_message(message);

    let formatter: Arc<dyn OperationFormatter> = match format {
      FormatOption::XmlSerializer(format) => Arc::new(XmlSerializerOperationFormatter::build(&operation, format)?),
      FormatOption::DataContract(format) => Arc::new(DataContractOperationFormatter::new(&operation, format, None)?),
    };
    tracing::debug!(
      "ConverterFactory: created converter: type = {}, action = {:?}, namespace = {}, strategy = {}",
      contract_type.type_name(),
      action,
      namespace,
      format.strategy()
    );
    Ok(TypedMessageConverter::from_formatter(formatter))
  }
}
