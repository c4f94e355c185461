mod error;
mod pool;
mod stores;
mod tables;

pub use error::*;
pub use pool::*;
pub use stores::*;
pub use tables::*;
