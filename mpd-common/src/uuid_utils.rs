//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// Parse a parameter set id taken from a request path
///
/// A malformed id cannot name an existing parameter set, so it is reported
/// as not found rather than as a bad request.
pub fn parse_parameter_id(s: &str) -> crate::Result<Uuid> {
    parse(s.trim()).map_err(|_| crate::Error::parameter_set_not_found(s))
}
