pub mod contract_type;
pub mod description_builder;
pub mod message_description;
pub mod naming;
pub mod operation_description;

pub use self::{
  contract_type::*, description_builder::*, message_description::*, naming::*, operation_description::*,
};
