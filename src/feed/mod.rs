//! Feed Decoder (spec §4.F) and the intermediate CSV cache (spec §6 / SPEC_FULL §4.K).

pub mod csv;
pub mod decoder;
pub mod error;

pub use decoder::FeedDecoder;
pub use error::DecodeError;
