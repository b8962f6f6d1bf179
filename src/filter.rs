use serde_json::{Map, Value};
use tracing::warn;

use crate::classify::{Classifier, EntryContext, Verdict};
use crate::config::Strategy;
use crate::lookup::{lookup, lookup_mut};

/// Recursive timeline filter. Rebuilds entry arrays leaf-first, applying
/// classifier verdicts, and commits the rebuilt array only when the
/// empty-result guard allows it.
pub struct TreeFilter<'a> {
    classifier: &'a Classifier,
    strategy: Strategy,
    ctx: EntryContext,
}

impl<'a> TreeFilter<'a> {
    pub fn new(classifier: &'a Classifier, strategy: Strategy, ctx: EntryContext) -> Self {
        Self {
            classifier,
            strategy,
            ctx,
        }
    }

    /// Filter one instruction array in place. Returns whether anything was
    /// dropped or altered. An instruction survives unless its singular
    /// `entry` is classified away; instructions without entries (terminate
    /// markers etc.) always survive.
    pub fn process_instructions(&self, instructions: &mut Vec<Value>) -> bool {
        let original_len = instructions.len();
        let backup = instructions.clone();
        let mut modified = false;
        let mut kept = Vec::with_capacity(original_len);

        for mut instruction in instructions.drain(..) {
            let mut keep = true;

            if let Some(Value::Array(entries)) = instruction.get_mut("entries") {
                if self.filter_entries(entries, false) {
                    modified = true;
                }
            }

            if let Some(Value::Array(items)) = instruction.get_mut("moduleItems") {
                if self.filter_entries(items, true) {
                    modified = true;
                }
            }

            if let Some(entry) = instruction.get_mut("entry") {
                let mut items_emptied = false;
                if let Some(Value::Array(items)) = lookup_mut(entry, &["content", "items"]) {
                    let pre_len = items.len();
                    if self.filter_entries(items, true) {
                        modified = true;
                    }
                    if pre_len > 0 && items.is_empty() {
                        items_emptied = true;
                    }
                }

                match self.classifier.classify(entry, self.ctx) {
                    Verdict::Essential => {}
                    _ if items_emptied => {
                        keep = false;
                        modified = true;
                    }
                    Verdict::Advertisement => match self.strategy {
                        Strategy::Remove => {
                            keep = false;
                            modified = true;
                        }
                        Strategy::Neutralize => {
                            if !self.classifier.is_cursor_or_pagination(entry) {
                                let shell = neutralize_entry(entry);
                                // Already-neutralized shells stay as they are,
                                // so a second pass is a true no-op
                                if *entry != shell {
                                    *entry = shell;
                                    modified = true;
                                }
                            }
                        }
                    },
                    Verdict::Ordinary => {}
                }
            }

            // Nested instruction groups embedded inside an instruction
            if let Some(Value::Array(nested)) = lookup_mut(&mut instruction, &["timeline", "instructions"])
            {
                if self.process_instructions(nested) {
                    modified = true;
                }
            } else if let Some(Value::Array(nested)) = instruction.get_mut("instructions") {
                if self.process_instructions(nested) {
                    modified = true;
                }
            }

            if keep {
                kept.push(instruction);
            }
        }

        if kept.is_empty() && original_len > 0 {
            warn!(
                instructions = original_len,
                "filtering would empty the instruction array; keeping original"
            );
            *instructions = backup;
            return false;
        }

        *instructions = kept;
        modified
    }

    /// Filter one entries array in place, leaf-first. `nested` marks sub-item
    /// lists: those are allowed to end up empty (their emptying makes the
    /// owning entry droppable), while a top-level array that would empty is
    /// restored verbatim and reported unmodified.
    pub fn filter_entries(&self, entries: &mut Vec<Value>, nested: bool) -> bool {
        let original_len = entries.len();
        let backup = if nested { Vec::new() } else { entries.clone() };
        let mut modified = false;
        let mut kept = Vec::with_capacity(original_len);

        for mut entry in entries.drain(..) {
            let mut items_emptied = false;
            if let Some(Value::Array(items)) = lookup_mut(&mut entry, &["content", "items"]) {
                let pre_len = items.len();
                if self.filter_entries(items, true) {
                    modified = true;
                }
                if pre_len > 0 && items.is_empty() {
                    items_emptied = true;
                }
            }

            let keep = match self.classifier.classify(&entry, self.ctx) {
                Verdict::Essential => true,
                // An emptied, non-essential container is dead weight
                _ if items_emptied => {
                    modified = true;
                    false
                }
                Verdict::Advertisement => match self.strategy {
                    Strategy::Remove => {
                        modified = true;
                        false
                    }
                    Strategy::Neutralize => {
                        if !self.classifier.is_cursor_or_pagination(&entry) {
                            let shell = neutralize_entry(&entry);
                            if entry != shell {
                                entry = shell;
                                modified = true;
                            }
                        }
                        true
                    }
                },
                Verdict::Ordinary => true,
            };

            if keep {
                kept.push(entry);
            }
        }

        if !nested && kept.is_empty() && original_len > 0 {
            warn!(
                entries = original_len,
                "filtering would empty the entries array; keeping original"
            );
            *entries = backup;
            return false;
        }

        *entries = kept;
        modified
    }
}

/// Replace an entry with a minimal placeholder: identifier and ordering
/// fields, any pagination state, and an identification-only content stub.
/// All promotional payload is stripped.
pub fn neutralize_entry(entry: &Value) -> Value {
    let mut shell = Map::new();
    for key in ["entryId", "sortIndex", "cursor", "__typename"] {
        if let Some(v) = entry.get(key) {
            shell.insert(key.to_string(), v.clone());
        }
    }

    let mut stub = Map::new();
    for key in ["entryType", "cursorType"] {
        if let Some(v) = lookup(entry, &["content", key]) {
            stub.insert(key.to_string(), v.clone());
        }
    }
    if !stub.is_empty() {
        shell.insert("content".to_string(), Value::Object(stub));
    }

    Value::Object(shell)
}
