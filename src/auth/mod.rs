//! Identity verification at the service boundary.

pub mod jwt;

pub use jwt::{extract_identity, verify_token, Claims, JwtConfig};
