pub mod config;
pub mod event;
pub mod feed_service;
pub mod scheduler;
pub mod seed;
pub mod simulator;
pub mod source;
pub mod view;

pub use config::{ConfigError, FeedConfig};
pub use feed_service::FeedHandle;
pub use scheduler::{Scheduler, TickHandle, TokioScheduler};
pub use simulator::{FeedState, LiveFeedSimulator};
pub use source::{DataSource, RandomSource};
