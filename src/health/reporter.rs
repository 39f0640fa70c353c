use crate::config::HealthConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Path of the health endpoint, relative to the API base URL
pub const HEALTH_PATH: &str = "/api/v1/instance/health";

/// Time between two health reports
pub const HEALTH_INTERVAL: Duration = Duration::from_secs(10);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a single health report
#[derive(Debug, Error)]
pub enum HealthError {
    /// The request never got a response
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("failed to get health, status code: {code} - {status} - {body}")]
    Status {
        code: u16,
        status: String,
        body: String,
    },
}

/// `base64("<user_id>; <api_token>")`
pub fn bearer_token(user_id: &str, api_token: &str) -> String {
    STANDARD.encode(format!("{}; {}", user_id, api_token))
}

pub fn health_url(api_url: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), HEALTH_PATH)
}

/// Sends health reports and remembers the last logged failure
pub struct HealthReporter {
    http_client: Client,
    url: String,
    token: String,
    interval: Duration,
    last_error: Option<String>,
}

impl HealthReporter {
    pub fn new(config: &HealthConfig) -> Self {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            url: health_url(&config.api_url),
            token: bearer_token(&config.user_id, &config.api_token),
            interval: HEALTH_INTERVAL,
            last_error: None,
        }
    }

    /// Overrides the reporting period
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one report
    pub async fn report(&self) -> Result<(), HealthError> {
        let response = self
            .http_client
            .put(&self.url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(HealthError::Status {
            code: status.as_u16(),
            status: status.to_string(),
            body,
        })
    }

    /// Logs `result` unless it repeats the previous failure.
    ///
    /// Returns whether a line was logged.
    pub fn observe(&mut self, result: Result<(), HealthError>) -> bool {
        match result {
            Ok(()) => match self.last_error.take() {
                Some(_) => {
                    info!("health check: recovered");
                    true
                }
                None => {
                    debug!("health check: ok");
                    false
                }
            },
            Err(e) => {
                let message = e.to_string();
                if self.last_error.as_deref() == Some(message.as_str()) {
                    return false;
                }
                warn!("health check: {}", message);
                self.last_error = Some(message);
                true
            }
        }
    }

    async fn tick(&mut self) {
        let result = self.report().await;
        self.observe(result);
    }

    /// Reports every interval, starting immediately, until `cancel` fires
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("health check: stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    /// Starts [`run`](Self::run) on the current tokio runtime
    pub fn spawn(self) -> HealthHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        HealthHandle { cancel, task }
    }
}

/// Handle to a spawned health reporter
pub struct HealthHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl HealthHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the reporter and waits for it to exit
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("health check: task ended abnormally: {}", e);
        }
    }
}
