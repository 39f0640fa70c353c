//! Periodic health reporting to the control API
//!
//! While enabled, the instance sends an authenticated `PUT` to
//! `<api_url>/api/v1/instance/health` right away and then every 10 seconds.
//! Failures are logged, de-duplicated by message, and retried on the next tick.
//!
//! # Example
//!
//! ```no_run
//! use codec_init::config::HealthConfig;
//! use codec_init::health::HealthReporter;
//!
//! # async fn example(config: HealthConfig) {
//! let handle = HealthReporter::new(&config).spawn();
//! // ...
//! handle.stop().await;
//! # }
//! ```

pub mod reporter;

pub use reporter::{
    bearer_token, health_url, HealthError, HealthHandle, HealthReporter, HEALTH_INTERVAL,
    HEALTH_PATH,
};
