pub mod config;
pub mod crypto;
pub mod errors;
pub mod keychain;
pub mod shared;
pub mod vault;

pub use errors::{KeychainError, Result};
pub use keychain::Keychain;
pub use shared::SharedKeychain;
pub use vault::VaultDump;
