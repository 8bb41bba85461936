//! Built-in schema rules.

pub mod deletion;
pub mod identifier;
pub mod payload;

pub use deletion::DeletionMarkerRule;
pub use identifier::IdentifierRule;
pub use payload::PayloadRule;
