// Adapters layer: concrete implementations of the domain ports.

pub mod traffic;

pub use traffic::InternalIps;
