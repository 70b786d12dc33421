// src/transfer/conflict.rs
//!
//! Collision-safe naming for imported files
//!
//! An import never overwrites. When the candidate path is taken, the file name
//! gets a `CONFLICT_<YYYY-MM-DD_HH-mm-ss>_` prefix.
//!

use std::sync::Arc;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::vault::{path, VaultError, VaultStore};

pub const CONFLICT_PREFIX: &str = "CONFLICT_";

/// Upper bound on numbered fallbacks within one second
const MAX_CONFLICT_ATTEMPTS: u32 = 1000;

/// Source of the timestamp stamped into conflict names
pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// Local wall-clock time, UTC when the local offset cannot be determined
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn system_clock() -> Clock {
    Arc::new(local_now)
}

/// `YYYY-MM-DD_HH-mm-ss`
pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    at.format(&format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// `CONFLICT_<timestamp>_<name>`
pub fn conflict_name(name: &str, at: OffsetDateTime) -> String {
    format!("{}{}_{}", CONFLICT_PREFIX, format_timestamp(at), name)
}

/// Target chosen for one imported file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: String,
    pub renamed: bool,
}

/// Pick the path `name` is written to inside `folder`.
///
/// Any existing entry at the candidate path, file or folder, triggers the
/// rename. Should the prefixed name be taken as well (two imports in the same
/// second), a counter is inserted after the timestamp.
pub async fn resolve_target(
    store: &dyn VaultStore,
    folder: &str,
    name: &str,
    at: OffsetDateTime,
) -> Result<ResolvedTarget, VaultError> {
    let candidate = path::join(folder, name)?;
    if store.entry(&candidate).await?.is_none() {
        return Ok(ResolvedTarget {
            path: candidate,
            renamed: false,
        });
    }

    let renamed = path::join(folder, &conflict_name(name, at))?;
    if store.entry(&renamed).await?.is_none() {
        return Ok(ResolvedTarget {
            path: renamed,
            renamed: true,
        });
    }

    let stamp = format_timestamp(at);
    for attempt in 2..=MAX_CONFLICT_ATTEMPTS {
        let numbered = path::join(
            folder,
            &format!("{}{}_{}_{}", CONFLICT_PREFIX, stamp, attempt, name),
        )?;
        if store.entry(&numbered).await?.is_none() {
            return Ok(ResolvedTarget {
                path: numbered,
                renamed: true,
            });
        }
    }

    Err(VaultError::AlreadyExists { path: candidate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_timestamp_zero_padded() {
        let at = datetime!(2024-03-07 09:05:02 UTC);
        assert_eq!(format_timestamp(at), "2024-03-07_09-05-02");
    }

    #[test]
    fn test_format_timestamp_24_hour() {
        let at = datetime!(2023-12-31 23:59:59 UTC);
        assert_eq!(format_timestamp(at), "2023-12-31_23-59-59");
    }

    #[test]
    fn test_conflict_name() {
        let at = datetime!(2024-03-07 09:05:02 UTC);
        assert_eq!(
            conflict_name("photo.png", at),
            "CONFLICT_2024-03-07_09-05-02_photo.png"
        );
    }
}
