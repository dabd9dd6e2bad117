//! Reading `|bibinfo>` declarations.
//!
//! The JSON shape is `{"bibliography": [{"tag", "type", "data": {...}}]}`.
//! Anything that cannot be read or parsed is an error for that source only;
//! shape problems skip the offending part with a warning.

use std::path::Path;

use serde_json::{Map, Value};

use super::entry::{BibEntry, EntryFields, EntryKind};
use crate::diagnostics::{DiagnosticKind, Report};
use crate::io;
use crate::parsing::blocks::kinds::meta::BibInfo;
use crate::parsing::text::Position;

/// Reads the entries one declaration contributes, in declaration order.
pub fn load_entries(
    info: &BibInfo,
    base_dir: Option<&Path>,
    report: &mut Report,
    at: Option<Position>,
) -> Vec<BibEntry> {
    let (source_name, text) = if info.inline {
        ("inline bibinfo".to_string(), info.raw.clone())
    } else {
        let path = io::resolve(info.raw.trim(), base_dir);
        let source_name = path.display().to_string();
        match io::read_file(&path) {
            Ok(text) => (source_name, text),
            Err(err) => {
                report.error(
                    DiagnosticKind::UnreadableBibliographyFile {
                        source_name,
                        reason: err.to_string(),
                    },
                    at,
                );
                return Vec::new();
            }
        }
    };

    let root: Value = match serde_json::from_str(&text) {
        Ok(root) => root,
        Err(err) => {
            report.error(
                DiagnosticKind::UnreadableBibliographyFile {
                    source_name,
                    reason: err.to_string(),
                },
                at,
            );
            return Vec::new();
        }
    };

    let mut reader = EntryReader {
        source_name,
        report,
        at,
    };
    let Some(list) = root.get("bibliography") else {
        reader.malformed("missing \"bibliography\" array".to_string());
        return Vec::new();
    };
    let Some(list) = list.as_array() else {
        reader.malformed("\"bibliography\" is not an array".to_string());
        return Vec::new();
    };
    log::debug!("reading {} bibliography entries from {}", list.len(), reader.source_name);
    list.iter()
        .enumerate()
        .filter_map(|(i, value)| reader.entry(i, value))
        .map(|entry| BibEntry {
            ref_file: info.ref_file.clone(),
            ..entry
        })
        .collect()
}

struct EntryReader<'r> {
    source_name: String,
    report: &'r mut Report,
    at: Option<Position>,
}

impl EntryReader<'_> {
    fn malformed(&mut self, detail: String) {
        self.report.warn(
            DiagnosticKind::MalformedBibliography {
                source_name: self.source_name.clone(),
                detail,
            },
            self.at,
        );
    }

    fn entry(&mut self, i: usize, value: &Value) -> Option<BibEntry> {
        let Some(object) = value.as_object() else {
            self.malformed(format!("entry {i} is not an object"));
            return None;
        };
        let Some(tag) = object.get("tag").and_then(Value::as_str) else {
            self.malformed(format!("entry {i} has no string \"tag\""));
            return None;
        };
        let kind = match object.get("type") {
            None => EntryKind::Other,
            Some(Value::String(kind)) => EntryKind::parse(kind).unwrap_or_else(|| {
                self.malformed(format!("entry `{tag}` has unknown type `{kind}`"));
                EntryKind::Other
            }),
            Some(_) => {
                self.malformed(format!("entry `{tag}` has a non-string type"));
                EntryKind::Other
            }
        };
        let fields = match object.get("data") {
            None => EntryFields::default(),
            Some(Value::Object(data)) => self.fields(tag, data),
            Some(_) => {
                self.malformed(format!("entry `{tag}` has a non-object \"data\""));
                EntryFields::default()
            }
        };
        Some(BibEntry {
            tag: tag.to_string(),
            kind,
            fields,
            index: 0,
            ref_file: None,
        })
    }

    fn fields(&mut self, tag: &str, data: &Map<String, Value>) -> EntryFields {
        let mut fields = EntryFields::default();
        for (key, value) in data {
            let Some(value) = value.as_str() else {
                self.malformed(format!("field `{key}` of entry `{tag}` is not a string"));
                continue;
            };
            if !fields.set(key, value.to_string()) {
                self.malformed(format!("entry `{tag}` has unknown field `{key}`"));
            }
        }
        fields
    }
}
