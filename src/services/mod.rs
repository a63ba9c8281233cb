//! Business logic services layer

pub mod access_service;

pub use access_service::AccessService;
