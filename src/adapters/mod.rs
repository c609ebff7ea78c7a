// Adapters layer: concrete implementations of the domain ports for the host system.

pub mod console;
pub mod volumes;

pub use console::ConsoleReporter;
pub use volumes::SystemVolumes;
