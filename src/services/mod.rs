pub mod adapter;
pub mod adapters;
pub mod convert_service;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod title_parser;
pub mod translit;
