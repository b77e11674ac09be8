//! Route memoization across instances.

mod route_cache;

pub use route_cache::{CacheStats, CachedRoute, RouteCache};
