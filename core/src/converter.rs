pub mod converter_cache;
pub mod converter_config;
pub mod converter_config_option;
pub mod converter_error;
pub mod converter_factory;
pub mod typed_message_converter;

#[cfg(test)]
mod tests;

pub use self::{
  converter_cache::*, converter_config::*, converter_config_option::*, converter_error::*, converter_factory::*,
  typed_message_converter::*,
};
