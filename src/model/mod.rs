pub mod column;
pub mod credentials;
pub mod query;
pub mod result;
pub mod table;

pub use column::*;
pub use credentials::*;
pub use query::*;
pub use result::*;
pub use table::*;
