//! # evenza-auth
//!
//! Token issuing/validation and password hashing for the Evenza backend.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
