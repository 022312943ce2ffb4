pub mod exchange;
pub mod order;
pub mod payment;

pub use exchange::*;
pub use order::*;
pub use payment::*;
