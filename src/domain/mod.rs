pub mod item;
pub mod network;

pub use item::{Item, SortField};
pub use network::NetworkKind;
