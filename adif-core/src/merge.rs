//! Merging two records of the same contact.

use log::debug;

use crate::matcher::{minimum_viable, Matcher};
use crate::record::Record;

impl Matcher {
    /// Merge `source` into a copy of `destination`.
    ///
    /// Fields missing from `destination` are added. With `overwrite`, fields
    /// present in both take the `source` value when it differs; without it,
    /// existing `destination` fields are never touched. Fields only in
    /// `destination` are kept.
    ///
    /// Returns `(modified, merged)`. If either record is not viable or the
    /// two do not [match](Matcher::matches), returns `(false, Record::new())`.
    pub fn merge(&self, source: &Record, destination: &Record, overwrite: bool) -> (bool, Record) {
        if !minimum_viable(source) || !minimum_viable(destination) || !self.matches(source, destination) {
            return (false, Record::new());
        }

        let mut merged = destination.clone();
        let mut modified = false;
        for (name, value) in source.iter() {
            match merged.field(name) {
                None => {
                    debug!("new field {}: {:?}", name, value);
                    merged.set(name, value);
                    modified = true;
                }
                Some(existing) if overwrite && existing != value => {
                    debug!("updated {} from {:?} to {:?}", name, existing, value);
                    merged.set(name, value);
                    modified = true;
                }
                Some(_) => {}
            }
        }
        (modified, merged)
    }
}
