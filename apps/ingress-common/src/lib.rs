pub mod reqid;
pub mod respond;
pub mod security;

pub use reqid::*;
pub use respond::*;
pub use security::*;
