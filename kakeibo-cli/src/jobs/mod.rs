//! The scheduled jobs. Each `run` is one stateless invocation: it builds its
//! own client from the config, makes a fresh query, and either completes or
//! fails outright. There is no retry and no partial-success tracking.

pub mod fixed_costs;
pub mod gauge;
pub mod report;
pub mod summary;
