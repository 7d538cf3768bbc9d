/// Inspection bookkeeping core
///
/// `domain` holds the value objects; `services` implements the property
/// bookkeeping on top of the `PropertyStore` port.
pub mod domain;
pub mod services;
