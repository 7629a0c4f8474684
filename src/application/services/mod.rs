//! Business logic services for the application layer.

pub mod conversion_service;

pub use conversion_service::ConversionService;
