/// Ports module defining interfaces for hexagonal architecture
///
/// The bookkeeping core only has driven ports: the property store it reads
/// and writes, and the progress reporter it talks to during long operations.
pub mod outbound;
