pub mod auth_service;
pub mod cart_service;
pub mod checkout_service;
pub mod dashboard_service;
pub mod notifier;
pub mod order_assembler;
pub mod persistence;
