pub mod catalog;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod handlers;
pub mod logging;
pub mod paths;
pub mod quiz;
pub mod session;
pub mod state;
pub mod viewer;
pub mod wire;

#[cfg(test)]
pub mod testing;
