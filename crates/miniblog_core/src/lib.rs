pub mod domain;
pub mod ports;

pub use domain::{AdminCredentials, Entry, LoginError};
pub use ports::{EntryStore, PortError, PortResult};
