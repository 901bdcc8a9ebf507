mod config;
mod keys;
mod resolve;
