use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::classify::{Classifier, EntryContext};
use crate::config::Config;
use crate::error::Result;
use crate::filter::TreeFilter;
use crate::lookup::lookup_mut;
use crate::paths::TIMELINE_PATHS;

/// Sizes and outcome of one scrub pass, for the diagnostic side channel.
#[derive(Debug, Clone, Serialize)]
pub struct ScrubReport {
    pub bytes_in: usize,
    pub bytes_out: usize,
    pub changed: bool,
}

/// The document driver: bytes in, bytes out.
///
/// Probes every known timeline shape in the parsed document, filters each
/// resolved instruction array, and re-serializes only when something actually
/// changed. Any failure (unparseable input, re-encode error) degrades to
/// returning the original bytes; the boundary contract is "always return
/// usable bytes".
pub struct ScrubEngine {
    config: Config,
    classifier: Classifier,
}

impl ScrubEngine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let classifier = Classifier::new(&config)?;
        Ok(Self { config, classifier })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(Config::default())
    }

    /// Scrub one response body. Borrows the input back unchanged when nothing
    /// was filtered, when the body is not JSON, or when re-serialization
    /// fails.
    pub fn scrub<'a>(&self, body: &'a [u8]) -> Cow<'a, [u8]> {
        let mut document: Value = match serde_json::from_slice(body) {
            Ok(document) => document,
            Err(e) => {
                debug!(bytes = body.len(), error = %e, "body is not JSON; passing through");
                return Cow::Borrowed(body);
            }
        };

        if !self.scrub_document(&mut document) {
            return Cow::Borrowed(body);
        }

        match serde_json::to_vec(&document) {
            Ok(out) => {
                info!(
                    bytes_in = body.len(),
                    bytes_out = out.len(),
                    "scrubbed response body"
                );
                Cow::Owned(out)
            }
            Err(e) => {
                warn!(error = %e, "re-serialization failed; passing original through");
                Cow::Borrowed(body)
            }
        }
    }

    /// Scrub plus the size report, for callers that want diagnostics.
    pub fn scrub_with_report<'a>(&self, body: &'a [u8]) -> (Cow<'a, [u8]>, ScrubReport) {
        let out = self.scrub(body);
        let report = ScrubReport {
            bytes_in: body.len(),
            bytes_out: out.len(),
            changed: matches!(out, Cow::Owned(_)),
        };
        (out, report)
    }

    /// Walk every known timeline path in an already-parsed document and
    /// filter the instruction arrays found there. Returns whether anything
    /// changed. Paths that do not resolve are skipped.
    pub fn scrub_document(&self, document: &mut Value) -> bool {
        let root = if document.get("data").is_some() {
            &mut document["data"]
        } else {
            document
        };

        let mut changed = false;
        for path in TIMELINE_PATHS {
            let Some(Value::Array(instructions)) = lookup_mut(root, path.segments) else {
                continue;
            };

            let filter = TreeFilter::new(
                &self.classifier,
                self.config.strategy,
                EntryContext {
                    thread: path.thread,
                },
            );
            if filter.process_instructions(instructions) {
                debug!(path = %path.segments.join("."), "instructions modified");
                changed = true;
            }
        }

        changed
    }
}
