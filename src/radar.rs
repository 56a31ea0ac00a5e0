use serde::Deserialize;
use std::fmt::Display;

/// New type wrapper for a radar (Rapic) identifier.
///
/// Numeric ids are printed with at least two digits, so radar 2 is `02`, the way the archive
/// directories are named.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawRadarId")]
pub struct RadarId {
    id: String,
}

impl From<u32> for RadarId {
    fn from(val: u32) -> Self {
        RadarId {
            id: format!("{:02}", val),
        }
    }
}

impl From<&str> for RadarId {
    fn from(val: &str) -> Self {
        match val.parse::<u32>() {
            Ok(num) => RadarId::from(num),
            Err(_) => RadarId { id: val.to_owned() },
        }
    }
}

impl Display for RadarId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "{}", self.id)
    }
}

impl RadarId {
    /// The identifier as it appears in archive paths.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

// Configuration files may give the id as a number or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRadarId {
    Num(u32),
    Text(String),
}

impl From<RawRadarId> for RadarId {
    fn from(raw: RawRadarId) -> Self {
        match raw {
            RawRadarId::Num(num) => RadarId::from(num),
            RawRadarId::Text(text) => RadarId::from(text.as_str()),
        }
    }
}
