mod storage;
mod token;

pub use storage::FileStore;
pub use storage::KeyValueStore;
pub use storage::MemoryStore;
pub use storage::StorageError;
pub use token::TokenStore;
