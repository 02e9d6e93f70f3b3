pub mod auth;
pub mod cart;
pub mod checkout;
pub mod navigation;
pub mod orders;
pub mod products;
pub mod profile;
