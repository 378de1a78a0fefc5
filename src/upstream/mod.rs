pub mod primavera;
pub mod traits;

pub use primavera::*;
pub use traits::*;
