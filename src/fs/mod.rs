//! Store files on disk.

pub mod codec;
pub mod store;

pub use codec::{load_list, parse_int_or_default, save_list};
pub use store::TaskStore;
