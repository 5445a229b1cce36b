pub mod data_contract_formatter;
pub mod format_option;
pub mod operation_formatter;
mod xml_body;
pub mod xml_serializer_formatter;

pub use self::{data_contract_formatter::*, format_option::*, operation_formatter::*, xml_serializer_formatter::*};
