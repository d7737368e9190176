pub mod cache;

pub use cache::ListCache;
