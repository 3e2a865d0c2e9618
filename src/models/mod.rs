//! Business objects shared across the service and storage layers.

pub mod person;

pub use person::Person;
