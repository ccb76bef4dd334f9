pub(crate) mod feedback;
pub mod health_checks;

pub use health_checks::*;
