pub mod auth;
pub mod dev;
pub mod product;
pub mod storage;
pub mod user;

mod router;
pub use router::get_router;
