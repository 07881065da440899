//! Azure Translator dictionary lookup backend

mod client;
mod response;

pub use client::{AzureDictionaryClient, DEFAULT_ENDPOINT};
