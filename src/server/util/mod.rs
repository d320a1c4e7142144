//! Small helpers shared across services: token signing, password hashing,
//! random token generation and input validation.

pub mod jwt;
pub mod password;
pub mod token;
pub mod validate;
