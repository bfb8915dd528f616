pub mod abbreviation;

pub use abbreviation::Entity as AbbreviationEntity;
