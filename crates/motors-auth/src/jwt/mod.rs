//! JWT issuance, verification and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

pub use claims::AccountClaims;
pub use decoder::TokenVerifier;
pub use encoder::TokenIssuer;
pub use error::TokenError;
