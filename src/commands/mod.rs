pub mod config;
pub mod dones;
pub mod interactive;
pub mod open;
pub mod teams;
