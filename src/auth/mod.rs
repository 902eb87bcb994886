pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

// Re-export necessary items
pub use extractors::AuthenticatedSubject;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};
