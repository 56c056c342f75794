//! ChannelId - Cheap-to-clone sensor channel identifier
//!
//! Uses Arc<str> internally so the per-row and per-render paths can clone
//! channel names without allocating.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Well-known IMU header vocabulary.
///
/// Uploads are accepted with any headers; these are the ones the default
/// chart mapping knows how to place. Anything else is preserved in the
/// series and simply ignored by the charts.
pub mod headers {
    /// Accelerometer axes (m/s²)
    pub const ACCELEROMETER: [&str; 3] = ["ax", "ay", "az"];
    /// Gyroscope axes (deg/s)
    pub const GYROSCOPE: [&str; 3] = ["gx", "gy", "gz"];
    /// Magnetometer axes (µT)
    pub const MAGNETOMETER: [&str; 3] = ["mx", "my", "mz"];
    /// Leading time column written by the recorder. Parsed like any other
    /// channel but never charted; the time axis is always re-derived.
    pub const TIME: &str = "Time";
}

/// Channel identifier with cheap cloning.
///
/// Created once at parse time from CSV headers (or the fixed stream layout)
/// and cloned freely by controllers and chart updaters.
#[derive(Clone, Default)]
pub struct ChannelId(Arc<str>);

impl ChannelId {
    /// Create a new ChannelId from a string slice.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this channel belongs to the well-known IMU vocabulary
    /// (one of `ax..az`, `gx..gz`, `mx..mz`).
    pub fn is_recognized(&self) -> bool {
        headers::ACCELEROMETER
            .iter()
            .chain(headers::GYROSCOPE.iter())
            .chain(headers::MAGNETOMETER.iter())
            .any(|h| *h == self.as_str())
    }
}

impl Deref for ChannelId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ChannelId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ChannelId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelId {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ChannelId {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelId({:?})", self.0)
    }
}

impl PartialEq for ChannelId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for ChannelId {}

impl PartialEq<str> for ChannelId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for ChannelId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Hash for ChannelId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl Serialize for ChannelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
