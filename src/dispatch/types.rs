use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyType {
    Medical,
    Fire,
    Patrol,
    Unknown,
}

impl EmergencyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Fire => "fire",
            Self::Patrol => "patrol",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "medical" => Some(Self::Medical),
            "fire" => Some(Self::Fire),
            "patrol" => Some(Self::Patrol),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Foreground shows an in-app alert; background schedules a system
/// notification.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Presence {
    #[default]
    Foreground,
    Background,
}

impl Presence {
    pub const fn is_foreground(self) -> bool {
        matches!(self, Self::Foreground)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        }
    }
}

/// Sentinel the store replaces with its own clock when the record lands.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ServerTimestamp;

impl Serialize for ServerTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(".sv", "timestamp")?;
        map.end()
    }
}

/// Record handed to the dispatch sink. Never mutated after creation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DispatchEvent {
    #[serde(rename = "type")]
    pub emergency_type: EmergencyType,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
    #[serde(rename = "timestamp")]
    pub dispatched_at: ServerTimestamp,
}

impl DispatchEvent {
    pub fn new(emergency_type: EmergencyType, location: Location) -> Self {
        Self {
            emergency_type,
            latitude: location.latitude,
            longitude: location.longitude,
            dispatched_at: ServerTimestamp,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOrigin {
    Manual,
    ButtonSequence,
}

impl DispatchOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::ButtonSequence => "button_sequence",
        }
    }
}
