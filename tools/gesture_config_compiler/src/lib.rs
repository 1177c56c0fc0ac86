//! Compiles `config/gestures.toml` into the Rust source the `drone_rescue`
//! build script includes as `GESTURE_ENGINE_CONFIG`.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

/// Upper bound for `required_count`; matches the press window capacity.
pub const MAX_REQUIRED_COUNT: u32 = 64;

const EMERGENCY_TYPES: [(&str, &str); 3] = [
    ("medical", "EmergencyType::Medical"),
    ("fire", "EmergencyType::Fire"),
    ("patrol", "EmergencyType::Patrol"),
];

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GesturesFile {
    pub shake: ShakeSection,
    pub volume_sequence: VolumeSequenceSection,
    pub dispatch: DispatchSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShakeSection {
    pub enabled: bool,
    pub magnitude_threshold: f32,
    pub sample_interval_ms: u32,
    pub required_count: u32,
    pub window_ms: u64,
    pub cooldown_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeSequenceSection {
    pub enabled: bool,
    pub trigger_key_code: i32,
    pub required_count: u32,
    pub window_ms: u64,
    pub cooldown_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchSection {
    pub status_path: String,
    pub assistant_log_path: String,
    pub sequence_emergency: String,
}

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

pub fn parse_events_file(path: &Path) -> Result<GesturesFile, ConfigCompilerError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&raw).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &GesturesFile) -> Result<(), ConfigCompilerError> {
    let shake = &config.shake;
    if !shake.magnitude_threshold.is_finite() || shake.magnitude_threshold <= 0.0 {
        return invalid("shake.magnitude_threshold must be finite and > 0");
    }
    if shake.sample_interval_ms == 0 {
        return invalid("shake.sample_interval_ms must be > 0");
    }
    validate_burst("shake", shake.required_count, shake.window_ms)?;

    let volume = &config.volume_sequence;
    validate_burst("volume_sequence", volume.required_count, volume.window_ms)?;

    let dispatch = &config.dispatch;
    if dispatch.status_path.trim().is_empty() {
        return invalid("dispatch.status_path must not be empty");
    }
    if dispatch.assistant_log_path.trim().is_empty() {
        return invalid("dispatch.assistant_log_path must not be empty");
    }
    if emergency_variant(&dispatch.sequence_emergency).is_none() {
        return invalid("dispatch.sequence_emergency must be one of medical, fire, patrol");
    }

    Ok(())
}

fn validate_burst(section: &str, required_count: u32, window_ms: u64) -> Result<(), ConfigCompilerError> {
    if required_count == 0 || required_count > MAX_REQUIRED_COUNT {
        return Err(ConfigCompilerError::Validation(format!(
            "{section}.required_count must be between 1 and {MAX_REQUIRED_COUNT}"
        )));
    }
    if window_ms == 0 {
        return Err(ConfigCompilerError::Validation(format!(
            "{section}.window_ms must be > 0"
        )));
    }
    Ok(())
}

fn invalid(msg: &str) -> Result<(), ConfigCompilerError> {
    Err(ConfigCompilerError::Validation(msg.to_string()))
}

fn emergency_variant(name: &str) -> Option<&'static str> {
    EMERGENCY_TYPES
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, variant)| *variant)
}

/// Expects a config that already passed [`validate_config`].
pub fn render_generated_config(config: &GesturesFile) -> String {
    let shake = &config.shake;
    let volume = &config.volume_sequence;
    let dispatch = &config.dispatch;
    let sequence_emergency =
        emergency_variant(&dispatch.sequence_emergency).unwrap_or("EmergencyType::Medical");

    format!(
        "// @generated by gesture_config_compiler. Do not edit.

pub static GESTURE_ENGINE_CONFIG: GestureEngineConfig = GestureEngineConfig {{
    shake: ShakeConfig {{
        enabled: {shake_enabled},
        magnitude_threshold: {shake_threshold:?},
        sample_interval_ms: {shake_interval},
        burst: BurstConfig {{
            required_count: {shake_count},
            window_ms: {shake_window},
            cooldown_ms: {shake_cooldown},
        }},
    }},
    volume_sequence: VolumeSequenceConfig {{
        enabled: {volume_enabled},
        trigger_key_code: {volume_code},
        burst: BurstConfig {{
            required_count: {volume_count},
            window_ms: {volume_window},
            cooldown_ms: {volume_cooldown},
        }},
    }},
    dispatch: DispatchConfig {{
        status_path: {status_path:?},
        assistant_log_path: {log_path:?},
        sequence_emergency: {sequence_emergency},
    }},
}};
",
        shake_enabled = shake.enabled,
        shake_threshold = shake.magnitude_threshold,
        shake_interval = shake.sample_interval_ms,
        shake_count = shake.required_count,
        shake_window = shake.window_ms,
        shake_cooldown = shake.cooldown_ms,
        volume_enabled = volume.enabled,
        volume_code = volume.trigger_key_code,
        volume_count = volume.required_count,
        volume_window = volume.window_ms,
        volume_cooldown = volume.cooldown_ms,
        status_path = dispatch.status_path.as_str(),
        log_path = dispatch.assistant_log_path.as_str(),
        sequence_emergency = sequence_emergency,
    )
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_events_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
