pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::issue;
pub use handler::validate;
pub use handler::JwtHandler;
pub use handler::ISSUER;
pub use handler::MIN_SECRET_LENGTH;
