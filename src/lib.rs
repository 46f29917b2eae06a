//! Ordering backend for the restaurant site: menu, session carts, checkout
//! (persist the order, then notify the automation webhook) and the admin
//! sales dashboard.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
