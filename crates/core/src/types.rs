/// Identifiers assigned by the catalog API are integer primary keys.
pub type DbId = i64;
