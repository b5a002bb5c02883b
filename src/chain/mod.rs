pub mod object_parser;
pub mod queries;
pub mod sui_client;
pub mod tx;
