pub mod price;
pub mod repository;
pub mod routes;
