//! Classifier construction and the simulated response delay.
//!
//! Use [`create_classifier`] to build the classifier named by
//! `[chat].provider`, wrapped in a [`DelayedClassifier`] that holds each
//! reply back for `[chat].response_delay_ms`.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use ecfr_explorer_core::classify::{Classifier, KeywordClassifier};
use ecfr_explorer_core::models::Facet;

use crate::config::ChatConfig;

/// Waits a fixed duration, then delegates to the inner classifier.
pub struct DelayedClassifier<C> {
    inner: C,
    delay: Duration,
}

impl<C: Classifier> DelayedClassifier<C> {
    pub fn new(inner: C, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl<C: Classifier> Classifier for DelayedClassifier<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn respond(&self, text: &str, facet: &Facet) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.respond(text, facet).await
    }
}

pub fn create_classifier(config: &ChatConfig) -> Result<Arc<dyn Classifier>> {
    let delay = Duration::from_millis(config.response_delay_ms);
    match config.provider.as_str() {
        "keyword" => Ok(Arc::new(DelayedClassifier::new(KeywordClassifier, delay))),
        other => bail!("Unknown chat provider: {}", other),
    }
}
