//! # Community Authentication
//!
//! Signed session tokens identifying the acting user on HTTP requests.
//!
//! ## Usage
//!
//! ```rust
//! use community_auth::JwtService;
//! use uuid::Uuid;
//!
//! let service = JwtService::with_secret("your-secret-key").unwrap();
//!
//! let user_id = Uuid::now_v7();
//! let token = service.issue_session(user_id, "ben").unwrap();
//!
//! let claims = service.validate_token(&token).unwrap();
//! assert_eq!(claims.user_id(), Some(user_id));
//! ```

pub mod claims;
pub mod error;
pub mod jwt;

pub use claims::SessionClaims;
pub use error::{AuthError, AuthResult};
pub use jwt::{JwtAlgorithm, JwtConfig, JwtService};
