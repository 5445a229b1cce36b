use crate::converter::ConverterConfig;
use crate::formatter::{DataContractFormat, FormatOption, XmlSerializerFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterConfigOption {
  SetNamespace(String),
  SetFormat(FormatOption),
}

impl ConverterConfigOption {
  pub fn apply(&self, config: &mut ConverterConfig) {
    match self {
      ConverterConfigOption::SetNamespace(namespace) => {
        config.set_namespace(Some(namespace.clone()));
      }
      ConverterConfigOption::SetFormat(format) => {
        config.set_format(format.clone());
      }
    }
  }

  pub fn with_namespace(namespace: &str) -> ConverterConfigOption {
    ConverterConfigOption::SetNamespace(namespace.to_string())
  }

  pub fn with_xml_serializer(format: XmlSerializerFormat) -> ConverterConfigOption {
    ConverterConfigOption::SetFormat(FormatOption::XmlSerializer(format))
  }

  pub fn with_data_contract(format: DataContractFormat) -> ConverterConfigOption {
    ConverterConfigOption::SetFormat(FormatOption::DataContract(format))
  }
}
