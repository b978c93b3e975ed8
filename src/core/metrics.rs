//! Prometheus metrics for command handling
//!
//! A single [`Metrics`] value is created at startup and shared between the
//! Telegram handlers (which record) and the web server (which renders).

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Bot metrics backed by a private registry
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    /// Handled commands by name
    /// Labels: command (start/price/crypto_news)
    pub commands_total: IntCounterVec,
    /// Time from receiving a command to the reply being sent
    /// Labels: command
    pub command_duration_seconds: HistogramVec,
    /// Replies that could not be delivered to the chat
    /// Labels: command
    pub reply_failures_total: IntCounterVec,
}

impl Metrics {
    /// Creates and registers all metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let commands_total = IntCounterVec::new(
            Opts::new("coinbot_commands_total", "Total number of handled chat commands"),
            &["command"],
        )?;
        let command_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "coinbot_command_duration_seconds",
                "Time spent handling a chat command, including upstream API calls",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["command"],
        )?;
        let reply_failures_total = IntCounterVec::new(
            Opts::new("coinbot_reply_failures_total", "Total number of replies that failed to send"),
            &["command"],
        )?;

        registry.register(Box::new(commands_total.clone()))?;
        registry.register(Box::new(command_duration_seconds.clone()))?;
        registry.register(Box::new(reply_failures_total.clone()))?;

        Ok(Self {
            registry,
            commands_total,
            command_duration_seconds,
            reply_failures_total,
        })
    }

    /// Content type of [`Metrics::render`] output
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Renders all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
