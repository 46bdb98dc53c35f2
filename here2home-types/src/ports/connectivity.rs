//! Network connectivity signal.

/// Reports whether the network is currently reachable.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}
