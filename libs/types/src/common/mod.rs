pub mod errors;
pub mod identifiers;
