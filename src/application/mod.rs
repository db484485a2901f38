pub mod normalize;
pub mod query;
pub mod session;
