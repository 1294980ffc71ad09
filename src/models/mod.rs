pub mod quote;
pub mod response;
pub mod stock;

pub use quote::*;
pub use response::*;
pub use stock::*;
