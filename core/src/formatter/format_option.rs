/// Shape of the body: `Document` writes the message as is, `Rpc` encloses it
/// in an element named after the operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum OperationFormatStyle {
  #[default]
  Document,
  Rpc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum OperationFormatUse {
  #[default]
  Literal,
  Encoded,
}

/// Options for the structural (data contract) formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataContractFormat {
  pub style: OperationFormatStyle,
}

impl DataContractFormat {
  pub fn with_style(mut self, style: OperationFormatStyle) -> Self {
    self.style = style;
    self
  }
}

/// Options for the mapping-based (XML serializer) formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XmlSerializerFormat {
  pub style: OperationFormatStyle,
  pub format_use: OperationFormatUse,
}

impl XmlSerializerFormat {
  pub fn with_style(mut self, style: OperationFormatStyle) -> Self {
    self.style = style;
    self
  }

  pub fn with_format_use(mut self, format_use: OperationFormatUse) -> Self {
    self.format_use = format_use;
    self
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum FormatterStrategy {
  Mapping,
  Structural,
}

/// Serialization strategy together with its options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatOption {
  XmlSerializer(XmlSerializerFormat),
  DataContract(DataContractFormat),
}

impl FormatOption {
  pub fn strategy(&self) -> FormatterStrategy {
    match self {
      FormatOption::XmlSerializer(_) => FormatterStrategy::Mapping,
      FormatOption::DataContract(_) => FormatterStrategy::Structural,
    }
  }

  pub fn style(&self) -> OperationFormatStyle {
    match self {
      FormatOption::XmlSerializer(format) => format.style,
      FormatOption::DataContract(format) => format.style,
    }
  }
}

impl Default for FormatOption {
  fn default() -> Self {
    FormatOption::DataContract(DataContractFormat::default())
  }
}

impl From<XmlSerializerFormat> for FormatOption {
  fn from(format: XmlSerializerFormat) -> Self {
    FormatOption::XmlSerializer(format)
  }
}

impl From<DataContractFormat> for FormatOption {
  fn from(format: DataContractFormat) -> Self {
    FormatOption::DataContract(format)
  }
}
