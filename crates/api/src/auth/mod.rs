//! Credentials and tokens.
//!
//! [`password`] hashes and checks passwords with Argon2id; [`jwt`] issues
//! access JWTs and refresh tokens.

pub mod jwt;
pub mod password;
