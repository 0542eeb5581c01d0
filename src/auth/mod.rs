//! Authentication module for the credential service
//!
//! This module handles account registration, password verification,
//! and session token issuance and refresh.

pub mod dto;
pub mod handlers;
pub mod password;
pub mod service;
pub mod token;

pub use dto::{AuthResult, LoginRequest, RefreshRequest, RegisterRequest};
pub use password::{BcryptHasher, PasswordHasher};
pub use service::AuthService;
pub use token::{Claims, JwtIssuer, TokenIssuer};
