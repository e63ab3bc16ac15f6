//! Core book types and error definitions
//!
//! - `Side`, `PriceLevel`: the primitives every other module speaks
//! - `DepthError`: failures of the depth analyzer

pub mod errors;
pub mod types;

pub use errors::{DepthError, SideLabel};
pub use types::{PriceLevel, Side};
