//! The single-record slot every builder wraps.

use std::fmt;

use cxbuild_types::{BuilderError, Record};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Holds zero or one record of type `T`.
///
/// States: empty, then loaded after the first create/load. There is no way
/// back to empty short of consuming the slot with `into_inner`.
pub struct HeldRecord<T> {
    slot: Option<T>,
}

impl<T: Record> HeldRecord<T> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_some()
    }

    /// Borrow the held record, or `NotLoaded` when empty.
    pub fn get(&self) -> Result<&T, BuilderError> {
        self.slot
            .as_ref()
            .ok_or(BuilderError::NotLoaded { kind: T::KIND })
    }

    pub fn get_mut(&mut self) -> Result<&mut T, BuilderError> {
        self.slot
            .as_mut()
            .ok_or(BuilderError::NotLoaded { kind: T::KIND })
    }

    /// Fail with `AlreadyLoaded` if a record is held and `overwrite` is off.
    ///
    /// Builders call this after argument validation so that a bad argument
    /// is reported ahead of the occupancy conflict.
    pub fn check_vacant(&self, overwrite: bool) -> Result<(), BuilderError> {
        if self.slot.is_some() && !overwrite {
            return Err(BuilderError::AlreadyLoaded { kind: T::KIND });
        }
        Ok(())
    }

    /// Store `record`, replacing any held one when `overwrite` is set.
    pub fn put(&mut self, record: T, overwrite: bool) -> Result<&mut T, BuilderError> {
        self.check_vacant(overwrite)?;
        let kind = T::KIND;
        if self.slot.is_some() {
            warn!(%kind, "Replacing held record");
        } else {
            debug!(%kind, "Holding new record");
        }
        Ok(self.slot.insert(record))
    }

    /// Interpret a JSON document as a `T`.
    ///
    /// Unknown keys are kept on the record, but a key that belongs to a
    /// different record kind is a `TypeMismatch`.
    pub fn parse(value: Value) -> Result<T, BuilderError> {
        if let Value::Object(map) = &value {
            if let Some(key) = T::OTHER_RECORD_KEYS.iter().find(|k| map.contains_key(**k)) {
                return Err(BuilderError::TypeMismatch(format!(
                    "expected {}: field `{key}` belongs to another record type",
                    T::KIND
                )));
            }
        }
        parse_value(value, &T::KIND.to_string())
    }

    pub fn into_inner(self) -> Option<T> {
        self.slot
    }
}

impl<T: Record> Default for HeldRecord<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> From<T> for HeldRecord<T> {
    fn from(record: T) -> Self {
        Self { slot: Some(record) }
    }
}

impl<T: fmt::Debug> fmt::Debug for HeldRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeldRecord").field("slot", &self.slot).finish()
    }
}

impl<T: Record> fmt::Display for HeldRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(record) => {
                let json = serde_json::to_string_pretty(record).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            None => write!(f, "<no {} held>", T::KIND),
        }
    }
}

/// Deserialize `value`, mapping any shape error to `TypeMismatch`.
pub(crate) fn parse_value<A: DeserializeOwned>(
    value: Value,
    what: &str,
) -> Result<A, BuilderError> {
    serde_json::from_value(value)
        .map_err(|e| BuilderError::TypeMismatch(format!("expected {what}: {e}")))
}

/// Empty strings are the unset value in the service schema.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// At most one of page and flow may be targeted.
pub(crate) fn check_single_target(
    target_page: &Option<String>,
    target_flow: &Option<String>,
) -> Result<(), BuilderError> {
    if target_page.is_some() && target_flow.is_some() {
        return Err(BuilderError::ConflictingFields(
            "at most one of target_page and target_flow can be specified".to_string(),
        ));
    }
    Ok(())
}
