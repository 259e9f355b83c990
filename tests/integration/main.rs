//! Integration tests with a mock HTTP server standing in for Google speech endpoints

mod cli;
mod generator;
mod mock_server;
