use crate::description::DescriptionError;
use crate::formatter::FormatterError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConverterError {
  #[error("argument `{0}` is missing")]
  ArgumentMissing(&'static str),
  #[error("argument `{argument}` is invalid: {reason}")]
  ArgumentInvalid { argument: &'static str, reason: String },
  #[error("action mismatch: converter expects `{expected}` but the message carries `{actual}`")]
  ActionMismatch { expected: String, actual: String },
  #[error("message description error: {0}")]
  Description(#[from] DescriptionError),
  #[error("formatter error: {0}")]
  Formatter(#[from] FormatterError),
}

static_assertions::assert_impl_all!(ConverterError: Send, Sync);
