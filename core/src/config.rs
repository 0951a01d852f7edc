use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "workzone-polygons";

pub const POLYGON_SIZE_DEFAULT: f32 = 40.0;
pub const POLYGON_SIZE_MIN: f32 = 16.0;
pub const POLYGON_SIZE_MAX: f32 = 200.0;

pub const VERTEX_MIN: u8 = 3;
pub const VERTEX_MAX: u8 = 8;

pub const TRAY_COUNT_MIN: u32 = 5;
pub const TRAY_COUNT_MAX: u32 = 20;
pub const TRAY_COUNT_LIMIT: u32 = 200;

pub const CELL_SIZE_DEFAULT: f32 = 20.0;
pub const CELL_SIZE_MIN: f32 = 4.0;
pub const CELL_SIZE_MAX: f32 = 200.0;

pub const ZOOM_MIN_DEFAULT: f32 = 0.5;
pub const ZOOM_MAX_DEFAULT: f32 = 3.0;
pub const ZOOM_STEP_DEFAULT: f32 = 0.1;
pub const ZOOM_FLOOR: f32 = 0.05;
pub const ZOOM_CEIL: f32 = 20.0;

pub const MIN_CELLS_X: u32 = 100;
pub const MIN_CELLS_Y: u32 = 50;

/// Keys `EditorConfig::apply_overrides` understands.
pub const OVERRIDE_KEYS: &[&str] = &[
    "cell",
    "zoom_min",
    "zoom_max",
    "zoom_step",
    "polygon_size",
    "tray_min",
    "tray_max",
    "storage_key",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub polygon_size: f32,
    pub vertex_min: u8,
    pub vertex_max: u8,
    pub tray_min: u32,
    pub tray_max: u32,
    pub cell_size: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    pub min_cells_x: u32,
    pub min_cells_y: u32,
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            polygon_size: POLYGON_SIZE_DEFAULT,
            vertex_min: VERTEX_MIN,
            vertex_max: VERTEX_MAX,
            tray_min: TRAY_COUNT_MIN,
            tray_max: TRAY_COUNT_MAX,
            cell_size: CELL_SIZE_DEFAULT,
            zoom_min: ZOOM_MIN_DEFAULT,
            zoom_max: ZOOM_MAX_DEFAULT,
            zoom_step: ZOOM_STEP_DEFAULT,
            min_cells_x: MIN_CELLS_X,
            min_cells_y: MIN_CELLS_Y,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Applies `key=value` overrides (typically the page query string).
    /// Unknown keys and unparsable values are skipped; the result is
    /// re-validated so bounds stay ordered.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut applied = Vec::new();
        for (key, value) in pairs {
            let value = value.trim();
            let ok = match key {
                "cell" => set_f32(&mut self.cell_size, value),
                "zoom_min" => set_f32(&mut self.zoom_min, value),
                "zoom_max" => set_f32(&mut self.zoom_max, value),
                "zoom_step" => set_f32(&mut self.zoom_step, value),
                "polygon_size" => set_f32(&mut self.polygon_size, value),
                "tray_min" => set_u32(&mut self.tray_min, value),
                "tray_max" => set_u32(&mut self.tray_max, value),
                "storage_key" => {
                    if value.is_empty() {
                        false
                    } else {
                        self.storage_key = value.to_string();
                        true
                    }
                }
                _ => false,
            };
            if ok {
                applied.push(key.to_string());
            }
        }
        self.validate();
        applied
    }

    pub fn validate(&mut self) {
        self.polygon_size = finite_or(self.polygon_size, POLYGON_SIZE_DEFAULT)
            .clamp(POLYGON_SIZE_MIN, POLYGON_SIZE_MAX);
        self.vertex_min = self.vertex_min.clamp(VERTEX_MIN, VERTEX_MAX);
        self.vertex_max = self.vertex_max.clamp(self.vertex_min, VERTEX_MAX);
        self.tray_min = self.tray_min.min(TRAY_COUNT_LIMIT);
        self.tray_max = self.tray_max.clamp(self.tray_min, TRAY_COUNT_LIMIT);
        self.cell_size =
            finite_or(self.cell_size, CELL_SIZE_DEFAULT).clamp(CELL_SIZE_MIN, CELL_SIZE_MAX);
        self.zoom_min = finite_or(self.zoom_min, ZOOM_MIN_DEFAULT).clamp(ZOOM_FLOOR, ZOOM_CEIL);
        self.zoom_max = finite_or(self.zoom_max, ZOOM_MAX_DEFAULT).clamp(self.zoom_min, ZOOM_CEIL);
        self.zoom_step = finite_or(self.zoom_step, ZOOM_STEP_DEFAULT).clamp(0.01, 1.0);
        self.min_cells_x = self.min_cells_x.max(1);
        self.min_cells_y = self.min_cells_y.max(1);
        if self.storage_key.trim().is_empty() {
            self.storage_key = STORAGE_KEY.to_string();
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn set_f32(slot: &mut f32, raw: &str) -> bool {
    match raw.parse::<f32>() {
        Ok(value) if value.is_finite() => {
            *slot = value;
            true
        }
        _ => false,
    }
}

fn set_u32(slot: &mut u32, raw: &str) -> bool {
    match raw.parse::<u32>() {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => false,
    }
}
