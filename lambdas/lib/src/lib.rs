pub mod env_keys;
pub mod key;
pub mod picture;
pub mod service;
