use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use drone_rescue::{
    gesture_engine::KeyAction, AccelerationSample, EmergencyType, KeyEvent, Presence,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceLine {
    Accel(AccelerationSample),
    Key(KeyEvent),
    Presence { ms: u64, presence: Presence },
    Manual { ms: u64, emergency_type: EmergencyType },
}

impl TraceLine {
    pub fn ms(&self) -> u64 {
        match self {
            Self::Accel(sample) => sample.observed_at_ms,
            Self::Key(event) => event.observed_at_ms,
            Self::Presence { ms, .. } | Self::Manual { ms, .. } => *ms,
        }
    }
}

pub fn parse_trace(path: &Path) -> Result<Vec<TraceLine>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line =
            line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parsed = parse_line(trimmed)
            .with_context(|| format!("{}:{line_no} invalid trace line", path.display()))?;
        out.push(parsed);
    }

    if out.windows(2).any(|w| w[1].ms() < w[0].ms()) {
        bail!("{} timestamps must be non-decreasing", path.display());
    }
    Ok(out)
}

pub fn parse_line(line: &str) -> Result<TraceLine> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let ms = parts
        .get(1)
        .ok_or_else(|| anyhow!("missing ms column"))
        .and_then(|raw| raw.parse::<u64>().with_context(|| format!("bad ms `{raw}`")))?;

    match parts[0] {
        "accel" => {
            let [_, _, x, y, z] = parts.as_slice() else {
                bail!("expected accel,ms,x,y,z");
            };
            Ok(TraceLine::Accel(AccelerationSample::new(
                parse_f32(x, "x")?,
                parse_f32(y, "y")?,
                parse_f32(z, "z")?,
                ms,
            )))
        }
        "key" => {
            let code = parts
                .get(2)
                .ok_or_else(|| anyhow!("expected key,ms,code[,down|up]"))?;
            let code = code
                .parse::<i32>()
                .with_context(|| format!("bad key code `{code}`"))?;
            let action = match parts.get(3).copied() {
                None | Some("down") => KeyAction::Down,
                Some("up") => KeyAction::Up,
                Some(other) => bail!("unknown key action `{other}`"),
            };
            Ok(TraceLine::Key(KeyEvent {
                code,
                action,
                observed_at_ms: ms,
            }))
        }
        "presence" => {
            let presence = match parts.get(2).copied() {
                Some("foreground") => Presence::Foreground,
                Some("background") => Presence::Background,
                other => bail!("expected foreground|background, got {other:?}"),
            };
            Ok(TraceLine::Presence { ms, presence })
        }
        "manual" => {
            let label = parts
                .get(2)
                .ok_or_else(|| anyhow!("expected manual,ms,type"))?;
            let emergency_type = EmergencyType::from_label(label)
                .ok_or_else(|| anyhow!("unknown emergency type `{label}`"))?;
            Ok(TraceLine::Manual { ms, emergency_type })
        }
        other => bail!("unknown record kind `{other}`"),
    }
}

fn parse_f32(raw: &str, field: &str) -> Result<f32> {
    raw.parse::<f32>()
        .with_context(|| format!("bad {field} value `{raw}`"))
}

/// One `kind:outcome` label per line, e.g. `shake:alert_raised`.
pub fn parse_expected(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("failed to read {}:{}", path.display(), idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !trimmed.contains(':') {
            bail!(
                "{}:{} expected kind:outcome, got `{trimmed}`",
                path.display(),
                idx + 1
            );
        }
        out.push(trimmed.to_string());
    }
    Ok(out)
}
