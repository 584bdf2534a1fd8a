/// Field metadata and field configuration payloads.
pub mod field;
/// Formula expression construction.
pub mod formula;
/// Response envelope parsing.
pub mod parse;
/// Record payloads.
pub mod record;
/// Name-to-identifier index building.
pub mod schema;
/// HTTP client for Bitable base operations.
pub mod serviceclient;
/// Table metadata.
pub mod table;
