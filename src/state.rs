use crate::rate_limit::RateLimiter;
use crate::validator::IdeaValidator;

// app's shared state, built once in main and handed to the router
#[derive(Clone)]
pub struct AppState {
    pub limiter: RateLimiter,    // per-client usage ceiling
    pub validator: IdeaValidator, // prompt + generation call
}

impl AppState {
    pub fn new(limiter: RateLimiter, validator: IdeaValidator) -> Self {
        Self { limiter, validator }
    }
}
