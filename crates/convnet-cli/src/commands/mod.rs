//! Command implementations.

pub mod build;
pub mod conventions;
pub mod inspect;

pub use self::build::execute_build;
pub use self::conventions::execute_conventions;
pub use self::inspect::{execute_inspect, rank_profiles};
