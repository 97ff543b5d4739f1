mod provider;

pub use provider::{DependentRepository, Provider};
