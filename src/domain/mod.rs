pub mod error;
pub mod model;
pub mod query_key;
pub mod raw;
pub mod traits;
