pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod navigation_service;
pub mod order_service;
pub mod profile_service;
