//! Types shared between the crop advisor client core and its front ends:
//! the field catalogue, the prediction wire format and wire-level errors.

pub mod domain;
pub mod error;
pub mod protocol;
