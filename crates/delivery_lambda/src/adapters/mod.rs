pub mod delivery_store;
pub mod dynamodb;
