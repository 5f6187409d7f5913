//! Client-side session state: the token cookie, the one-shot notice
//! cookie, and the identity resolved from them on each request.

pub mod cookie;
pub mod flash;
pub mod identity;

pub use cookie::SessionCookies;
pub use identity::RequestIdentity;
