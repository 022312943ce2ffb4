pub mod math;
pub mod pricing;
pub mod treasury;
pub mod validation;

pub use math::*;
pub use pricing::*;
pub use treasury::*;
pub use validation::*;
