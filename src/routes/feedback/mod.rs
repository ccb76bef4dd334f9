mod add;
mod get;
mod moderate;

pub use add::*;
pub use get::*;
pub use moderate::*;
