//! Request event publishing
//!
//! Creation events are handed off without waiting: the Redis publisher feeds
//! an in-process channel drained by a worker task, which pushes one JSON job
//! per event onto a Redis list for the mail worker to consume. Delivery
//! failures are retried a bounded number of times and never reach the caller.
//! The channel is bounded: while the worker is behind, new events are dropped.

use std::time::Duration;

use redis::{aio::ConnectionManager, AsyncCommands, Client};
use serde::Serialize;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::{
    config::NotificationsConfig,
    error::{AppError, AppResult},
    models::{Equipment, MaintenanceRequest},
};

/// Job type understood by the mail worker
pub const MAINTENANCE_CREATED: &str = "MAINTENANCE_CREATED";

/// Emitted once a maintenance request has been stored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCreated {
    pub request_id: i32,
    pub subject: String,
    pub equipment_name: String,
    pub email: String,
    pub maintenance_type: Option<i16>,
}

impl RequestCreated {
    pub fn new(request: &MaintenanceRequest, equipment: &Equipment, email: &str) -> Self {
        Self {
            request_id: request.id,
            subject: request
                .subject
                .clone()
                .unwrap_or_else(|| format!("Request #{}", request.id)),
            equipment_name: equipment.name.clone(),
            email: email.to_string(),
            maintenance_type: request.maintenance_type,
        }
    }
}

#[derive(Serialize)]
struct QueueJob<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    payload: &'a RequestCreated,
}

/// Sink for request lifecycle events
///
/// Implementations must not block: the call happens on the request path.
#[cfg_attr(test, mockall::automock)]
pub trait RequestEvents: Send + Sync {
    fn request_created(&self, event: RequestCreated);
}

/// Publisher used when notifications are disabled
pub struct NoopEvents;

impl RequestEvents for NoopEvents {
    fn request_created(&self, event: RequestCreated) {
        tracing::debug!("Notifications disabled, skipping event for request {}", event.request_id);
    }
}

/// Publisher pushing jobs onto a Redis list
pub struct RedisEventPublisher {
    sender: mpsc::Sender<RequestCreated>,
}

impl RedisEventPublisher {
    /// Connect to Redis and start the delivery worker
    pub async fn connect(config: &NotificationsConfig) -> AppResult<(Self, JoinHandle<()>)> {
        let client = Client::open(config.redis_url.as_str())
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        let (sender, receiver) = mpsc::channel(config.channel_capacity.max(1));
        let worker = QueueWorker {
            conn,
            queue: config.queue.clone(),
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        };
        let handle = tokio::spawn(worker.run(receiver));

        Ok((Self { sender }, handle))
    }
}

impl RequestEvents for RedisEventPublisher {
    fn request_created(&self, event: RequestCreated) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    "Notification queue full, dropping event for request {}",
                    event.request_id
                );
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(
                    "Notification worker stopped, dropping event for request {}",
                    event.request_id
                );
            }
        }
    }
}

struct QueueWorker {
    conn: ConnectionManager,
    queue: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl QueueWorker {
    async fn run(mut self, mut receiver: mpsc::Receiver<RequestCreated>) {
        while let Some(event) = receiver.recv().await {
            self.deliver(&event).await;
        }
        tracing::info!("Notification worker shutting down");
    }

    async fn deliver(&mut self, event: &RequestCreated) {
        let body = match encode_job(event) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to encode notification for request {}: {}", event.request_id, e);
                return;
            }
        };

        for attempt in 1..=self.max_attempts {
            match self.conn.lpush::<_, _, ()>(&self.queue, &body).await {
                Ok(()) => {
                    tracing::debug!("Queued notification for request {}", event.request_id);
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to queue notification for request {} (attempt {}/{}): {}",
                        event.request_id,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay * attempt).await;
                    }
                }
            }
        }

        tracing::error!("Giving up on notification for request {}", event.request_id);
    }
}

/// Serialize an event as a queue job
pub fn encode_job(event: &RequestCreated) -> Result<String, serde_json::Error> {
    serde_json::to_string(&QueueJob {
        kind: MAINTENANCE_CREATED,
        payload: event,
    })
}
