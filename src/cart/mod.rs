//! Cart

pub mod line;
pub mod observer;
pub mod store;

pub use line::CartLine;
pub use observer::{CartChange, CartObserver, ChangeKind, NoopObserver, ObserverKey};
pub use store::{CartError, CartStore};
