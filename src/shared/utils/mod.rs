pub mod logger;
pub mod rate_limiter;
pub mod validation;

pub use rate_limiter::RateLimiter;
pub use validation::Validator;
