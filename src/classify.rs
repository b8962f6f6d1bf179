use regex::Regex;
use serde_json::Value;

use crate::config::{CardPolicy, Config};
use crate::error::Result;
use crate::lookup::{lookup, lookup_str, truthy};

/// Classification of a timeline node. Derived per traversal, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Advertisement,
    Essential,
    Ordinary,
}

/// Contextual flags threaded through classification
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryContext {
    /// Inside a thread/conversation view, card fields do not mark ads
    /// (polls and media embeds in replies carry cards too).
    pub thread: bool,
}

/// Heuristic classifier over untyped timeline entries.
///
/// All predicates are pure functions of one node plus the context flags.
/// Essential and cursor checks take precedence over ad checks: a pinned
/// entry whose id happens to contain "promoted" is still kept.
pub struct Classifier {
    /// Lowercased substring patterns matched against `entryId`
    ad_patterns: Vec<String>,
    card_policy: CardPolicy,
    essential_id: Regex,
    protected_type: Regex,
    cursor_id: Regex,
}

impl Classifier {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            ad_patterns: config
                .ad_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            card_policy: config.card_policy,
            essential_id: Regex::new(
                r"(?i)cursor|conversation|thread|reply|timeline-response|module|who-to-follow|pin",
            )?,
            protected_type: Regex::new(
                r"(?i)TimelineCursor|TimelineModule|TimelineTimelineModule|TimelinePinEntry",
            )?,
            cursor_id: Regex::new(r"(?i)cursor|conversation|thread|reply|timeline-response")?,
        })
    }

    /// Classify one entry. Essential wins over Advertisement.
    pub fn classify(&self, entry: &Value, ctx: EntryContext) -> Verdict {
        if self.is_essential(entry) {
            Verdict::Essential
        } else if self.is_advertisement(entry, ctx) {
            Verdict::Advertisement
        } else {
            Verdict::Ordinary
        }
    }

    /// True when the entry looks like an advertisement: ad-pattern id,
    /// promotion marker fields, or (outside threads, under the strict card
    /// policy) a card payload. Cursor, module, and pinned entry types are
    /// never ads regardless of markers.
    pub fn is_advertisement(&self, entry: &Value, ctx: EntryContext) -> bool {
        let entry_type = entry_type(entry);
        if entry_type == "TimelineCursor"
            || entry_type.contains("TimelineModule")
            || entry_type == "TimelinePinEntry"
        {
            return false;
        }

        let id = entry_id(entry).to_lowercase();
        if self.ad_patterns.iter().any(|p| id.contains(p.as_str())) {
            return true;
        }

        let Some(item) = item_content(entry) else {
            return false;
        };

        let has_promoted = truthy(item.get("promotedMetadata"))
            || truthy(item.get("promoted_metadata"))
            || truthy(item.get("promoted"))
            || truthy(item.get("advertiser_info"))
            || lookup_str(item, &["socialContext", "contextType"]) == Some("Promoted");
        if has_promoted {
            return true;
        }

        if !ctx.thread
            && self.card_policy == CardPolicy::Strict
            && (truthy(item.get("card")) || truthy(item.get("card_reference")))
        {
            return true;
        }

        false
    }

    /// True when the entry must never be removed or neutralized: the main
    /// focus tweet of a detail view, cursors, conversation/thread structure,
    /// module containers, who-to-follow, pinned entries.
    pub fn is_essential(&self, entry: &Value) -> bool {
        if item_content(entry)
            .and_then(|item| item.get("tweetDisplayType"))
            .and_then(Value::as_str)
            == Some("TweetDetail")
        {
            return true;
        }

        self.essential_id.is_match(entry_id(entry)) || self.protected_type.is_match(entry_type(entry))
    }

    /// True when the entry carries pagination state. The neutralize strategy
    /// leaves these fully untouched so infinite scroll keeps working.
    pub fn is_cursor_or_pagination(&self, entry: &Value) -> bool {
        let has_cursor_field = truthy(entry.get("cursor"))
            || truthy(lookup(entry, &["content", "cursor"]))
            || truthy(lookup(entry, &["content", "cursorType"]))
            || item_content(entry).is_some_and(|item| truthy(item.get("cursorType")));

        has_cursor_field || self.cursor_id.is_match(entry_id(entry))
    }
}

/// The entry's identifier string, or "" when absent.
fn entry_id(entry: &Value) -> &str {
    entry.get("entryId").and_then(Value::as_str).unwrap_or("")
}

/// The entry's type marker: `content.entryType`, falling back to `__typename`.
fn entry_type(entry: &Value) -> &str {
    lookup_str(entry, &["content", "entryType"])
        .or_else(|| entry.get("__typename").and_then(Value::as_str))
        .unwrap_or("")
}

/// The content payload: `content.itemContent` for plain entries,
/// `item.itemContent` for module sub-items.
fn item_content(entry: &Value) -> Option<&Value> {
    lookup(entry, &["content", "itemContent"]).or_else(|| lookup(entry, &["item", "itemContent"]))
}
