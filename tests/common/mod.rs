//! Shared fixtures for integration tests
//!
//! Provides the rendered profile page fixture and scripted
//! `ProfileSource` fakes that count invocations.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use profile_grabber::{Profile, ProfileSource, SourceError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// The full rendered profile page
pub const PROFILE_PAGE: &str = include_str!("../fixtures/profile.html");

pub fn profile_page_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/profile.html")
}

/// Wrap experience list items in the minimum page around them
pub fn page_with_experience(items: &str) -> String {
    format!(
        r#"<html><body>
            <section class="top-card-layout">
                <h1 class="top-card-layout__title">Test Person</h1>
                <h2 class="top-card-layout__headline">Tester</h2>
            </section>
            <section data-section="summary"><p>Summary.</p></section>
            <ul class="experience__list">{}</ul>
        </body></html>"#,
        items
    )
}

/// A profile constructed `hours` ago
pub fn profile_aged(name: &str, hours: i64) -> Profile {
    Profile::new(name).with_generated_at(Utc::now() - ChronoDuration::hours(hours))
}

/// A source that sleeps, then returns a fixed outcome, counting calls
pub struct ScriptedSource {
    profile: Option<Profile>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn returning(profile: Profile) -> Arc<Self> {
        Arc::new(Self {
            profile: Some(profile),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            profile: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn slow(profile: Profile, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            profile: Some(profile),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> Result<Profile, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.profile {
            // Stamp at return time, as a real extraction would
            Some(profile) => Ok(profile.clone().with_generated_at(Utc::now())),
            None => Err(SourceError::Unavailable("unable to call profile site".to_string())),
        }
    }
}
