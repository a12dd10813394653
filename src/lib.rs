//! Quill — terminal pair-programming assistant.
//!
//! A line-oriented REPL that drives a multi-turn conversation with a
//! hosted language-model API, executing model-requested file and shell
//! tools locally and feeding the results back into the conversation.

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod repl;
pub mod tools;
pub mod types;
