pub mod envelope;
pub mod message_body;
pub mod message_headers;
pub mod message_version;

pub use self::{envelope::*, message_body::*, message_headers::*, message_version::*};
