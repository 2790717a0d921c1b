pub mod auth;
pub mod current_user;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use current_user::{current_user_middleware, CurrentUser};
pub use response::{ApiResponse, ApiResult};
