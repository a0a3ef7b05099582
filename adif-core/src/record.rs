//! ADIF record: field names to string values.
//!
//! Field names are case-insensitive. They are trimmed and upper-cased on the
//! way in, so `get("call")` and `get(" CALL ")` read the same field. The
//! fields are kept in an ordered map, which gives the sorted-by-tag output
//! order of [`Record::to_adif`] and [`Record::to_header`] for free.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// One ADIF record (a QSO, or the header block).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")
)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

/// Normalize a field name for storage and lookup.
fn field_key(name: &str) -> String {
    name.trim().to_uppercase()
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, or `""` if the field is absent.
    pub fn get(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }

    /// Value of a field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(&field_key(name)).map(String::as_str)
    }

    /// Set a field, replacing any previous value.
    ///
    /// A name that is empty after trimming is ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let key = field_key(name);
        if key.is_empty() {
            return;
        }
        self.fields.insert(key, value.into());
    }

    /// Remove a field, returning its value. Absent fields are a no-op.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(&field_key(name))
    }

    /// True if the field is present (even with an empty value).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&field_key(name))
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Render as one ADIF record: `<TAG:LEN>VALUE ` per field, then `<EOR>`.
    pub fn to_adif(&self) -> String {
        let mut out = String::new();
        for (tag, value) in &self.fields {
            push_field(&mut out, tag, value);
            out.push(' ');
        }
        out.push_str("<EOR>");
        out
    }

    /// Render as header lines: `<TAG:LEN>VALUE\n` per field, no terminator.
    pub fn to_header(&self) -> String {
        let mut out = String::new();
        for (tag, value) in &self.fields {
            push_field(&mut out, tag, value);
            out.push('\n');
        }
        out
    }
}

fn push_field(out: &mut String, tag: &str, value: &str) {
    use fmt::Write;
    // Writing to a String cannot fail
    let _ = write!(out, "<{}:{}>{}", tag, value.chars().count(), value);
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_adif())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        record.extend(iter);
        record
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for Record {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name.as_ref(), value);
        }
    }
}

impl From<BTreeMap<String, String>> for Record {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Record> for BTreeMap<String, String> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
