// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate.

pub mod authorization_provider;
pub mod crypto_provider;
pub mod validation;

pub use authorization_provider::AuthorizationProvider;
pub use crypto_provider::CryptoProvider;
