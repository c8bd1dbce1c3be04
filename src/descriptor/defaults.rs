use std::sync::OnceLock;

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::Deserialize;

const BUILTIN_DEFAULTS: &str = include_str!("defaults.json");

/// Key used when a geometry kind has no dedicated table entry.
pub const DEFAULT_KEY: &str = "default";

/// Static defaults table consulted whenever a descriptor leaves a field unset.
///
/// Entries are keyed by the descriptor's geometry `type` string; a missing key
/// falls back to the `default` entry, and a missing `default` entry falls back
/// to the hard-coded values below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Defaults {
    pub segments: u32,
    pub size: FxHashMap<String, Vec<f32>>,
    pub position: FxHashMap<String, Vec<f32>>,
    pub lathe_handler: Vec<f32>,
    pub parametric_handler: String,
    pub preloader_message: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            segments: 32,
            size: FxHashMap::default(),
            position: FxHashMap::default(),
            lathe_handler: vec![30.0],
            parametric_handler: "klein".to_string(),
            preloader_message: String::new(),
        }
    }
}

impl Defaults {
    /// Returns the table embedded in the crate.
    pub fn builtin() -> &'static Defaults {
        static BUILTIN: OnceLock<Defaults> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            serde_json::from_str(BUILTIN_DEFAULTS).expect("Embedded defaults.json is malformed")
        })
    }

    /// Parses a replacement table, e.g. one shipped alongside a world config.
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default `[x, y, z]` size for a geometry type.
    #[must_use]
    pub fn size_for(&self, kind: &str) -> [f32; 3] {
        let entry = self
            .size
            .get(kind)
            .or_else(|| self.size.get(DEFAULT_KEY));
        match entry {
            Some(values) => pad3(values, [100.0, 100.0, 100.0]),
            None => [100.0, 100.0, 100.0],
        }
    }

    /// Default position for a geometry type.
    #[must_use]
    pub fn position_for(&self, kind: &str) -> Vec3 {
        let entry = self
            .position
            .get(kind)
            .or_else(|| self.position.get(DEFAULT_KEY));
        entry.map_or(Vec3::ZERO, |values| Vec3::from_array(pad3(values, [0.0; 3])))
    }

    /// First lathe profile angle (degrees).
    #[must_use]
    pub fn lathe_angle(&self) -> f32 {
        self.lathe_handler.first().copied().unwrap_or(30.0)
    }
}

/// Fills missing trailing components of `values` from `fallback`.
#[must_use]
pub fn pad3(values: &[f32], fallback: [f32; 3]) -> [f32; 3] {
    let mut out = fallback;
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let defaults = Defaults::builtin();
        assert_eq!(defaults.segments, 32);
        assert_eq!(defaults.size_for("box"), [100.0, 100.0, 100.0]);
        assert_eq!(defaults.position_for("plane"), Vec3::new(0.0, -500.0, 0.0));
    }

    #[test]
    fn unknown_kind_uses_default_entry() {
        let defaults = Defaults::builtin();
        assert_eq!(defaults.size_for("unicorn"), defaults.size_for(DEFAULT_KEY));
        assert_eq!(defaults.position_for("unicorn"), Vec3::ZERO);
    }

    #[test]
    fn pad3_keeps_fallback_tail() {
        assert_eq!(pad3(&[1.0, 2.0], [7.0, 8.0, 9.0]), [1.0, 2.0, 9.0]);
    }
}
