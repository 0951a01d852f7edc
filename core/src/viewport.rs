use crate::config::EditorConfig;

pub const MARKER_STEP_MIN: i64 = 5;
pub const MARKER_STEP_BASE: f32 = 10.0;
const SCALE_EPSILON: f32 = 1.0e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A ruler label: `value` is the cell index, `percent` its offset along the
/// visible strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMarker {
    pub value: i64,
    pub percent: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

#[derive(Clone, Copy, Debug)]
struct PanState {
    start_x: f32,
    start_y: f32,
    initial_left: f32,
    initial_top: f32,
}

/// Scroll/zoom state of the work zone.
///
/// Three spaces are involved: client space (`clientX/Y` of mouse events),
/// scroll space (pixels inside the scrolled grid container) and workspace
/// space (unscaled pixels of the polygon layer, which the DOM renders with
/// `transform: scale(scale)` and origin `0 0`).
#[derive(Clone, Debug)]
pub struct Viewport {
    scale: f32,
    scroll_left: f32,
    scroll_top: f32,
    client_width: f32,
    client_height: f32,
    viewport_start: CellPos,
    current_cells: CellPos,
    canvas_width: f32,
    canvas_height: f32,
    pan: Option<PanState>,
    cell_size: f32,
    zoom_min: f32,
    zoom_max: f32,
    zoom_step: f32,
    min_cells: CellPos,
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        let min_cells = CellPos {
            x: config.min_cells_x,
            y: config.min_cells_y,
        };
        let mut viewport = Self {
            scale: 1.0f32.clamp(config.zoom_min, config.zoom_max),
            scroll_left: 0.0,
            scroll_top: 0.0,
            client_width: 0.0,
            client_height: 0.0,
            viewport_start: CellPos::default(),
            current_cells: min_cells,
            canvas_width: 0.0,
            canvas_height: 0.0,
            pan: None,
            cell_size: config.cell_size,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_step: config.zoom_step,
            min_cells,
        };
        viewport.refresh();
        viewport
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scroll(&self) -> (f32, f32) {
        (self.scroll_left, self.scroll_top)
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn viewport_start(&self) -> CellPos {
        self.viewport_start
    }

    pub fn current_cells(&self) -> CellPos {
        self.current_cells
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// On-screen size of one grid cell.
    pub fn cell_px(&self) -> f32 {
        self.cell_size * self.scale
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.client_width = non_negative(width);
        self.client_height = non_negative(height);
        self.refresh();
        self.clamp_scroll();
    }

    /// Mirrors a scroll position the browser reported.
    pub fn sync_scroll(&mut self, left: f32, top: f32) {
        self.scroll_left = non_negative(left);
        self.scroll_top = non_negative(top);
        self.refresh();
    }

    /// Steps the zoom by one notch towards `delta_y` and keeps the point under
    /// `(mouse_x, mouse_y)` (relative to the container's top-left) in place.
    /// A zero delta is ignored.
    pub fn zoom_at(&mut self, delta_y: f32, mouse_x: f32, mouse_y: f32) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let step = if delta_y > 0.0 {
            -self.zoom_step
        } else {
            self.zoom_step
        };
        self.zoom_to(self.scale + step, mouse_x, mouse_y)
    }

    pub fn zoom_to(&mut self, target: f32, mouse_x: f32, mouse_y: f32) -> bool {
        if !target.is_finite() {
            return false;
        }
        let old_scale = self.scale;
        let new_scale = round_scale(target).clamp(self.zoom_min, self.zoom_max);
        if (new_scale - old_scale).abs() <= SCALE_EPSILON {
            return false;
        }
        let change = new_scale / old_scale;
        self.scroll_left = mouse_x * (change - 1.0) + self.scroll_left * change;
        self.scroll_top = mouse_y * (change - 1.0) + self.scroll_top * change;
        self.scale = new_scale;
        self.refresh();
        self.clamp_scroll();
        true
    }

    pub fn begin_pan(&mut self, client_x: f32, client_y: f32) {
        self.pan = Some(PanState {
            start_x: client_x,
            start_y: client_y,
            initial_left: self.scroll_left,
            initial_top: self.scroll_top,
        });
    }

    pub fn pan_to(&mut self, client_x: f32, client_y: f32) -> bool {
        let Some(pan) = self.pan else {
            return false;
        };
        let walk_x = pan.start_x - client_x;
        let walk_y = pan.start_y - client_y;
        self.scroll_left = (pan.initial_left + walk_x).max(0.0);
        self.scroll_top = (pan.initial_top + walk_y).max(0.0);
        // The browser clamps against the canvas as it is before the refresh
        // grows it, so the canvas extends a screen at a time.
        self.clamp_scroll();
        self.refresh();
        true
    }

    pub fn end_pan(&mut self) -> bool {
        self.pan.take().is_some()
    }

    /// Recomputes the visible cell range and the size of the scrollable
    /// canvas. The canvas grows with the scroll position and never shrinks
    /// below twice the client size or the minimum cell extent.
    pub fn refresh(&mut self) {
        let cell = self.cell_px();
        if cell <= 0.0 {
            return;
        }
        let visible_x = (self.client_width / cell).ceil() as i64;
        let visible_y = (self.client_height / cell).ceil() as i64;
        let current_x = (self.scroll_left / cell).floor() as i64;
        let current_y = (self.scroll_top / cell).floor() as i64;

        self.viewport_start = CellPos {
            x: current_x.max(0) as u32,
            y: current_y.max(0) as u32,
        };
        self.current_cells = CellPos {
            x: (current_x + visible_x).max(i64::from(self.min_cells.x)) as u32,
            y: (current_y + visible_y).max(i64::from(self.min_cells.y)) as u32,
        };
        self.canvas_width =
            (self.current_cells.x as f32 * cell).max(self.client_width * 2.0);
        self.canvas_height =
            (self.current_cells.y as f32 * cell).max(self.client_height * 2.0);
    }

    fn clamp_scroll(&mut self) {
        let max_left = (self.canvas_width - self.client_width).max(0.0);
        let max_top = (self.canvas_height - self.client_height).max(0.0);
        self.scroll_left = self.scroll_left.clamp(0.0, max_left);
        self.scroll_top = self.scroll_top.clamp(0.0, max_top);
    }

    pub fn marker_step(&self) -> i64 {
        ((MARKER_STEP_BASE / self.scale).floor() as i64).max(MARKER_STEP_MIN)
    }

    /// Ruler labels for the visible range of one axis.
    pub fn markers(&self, axis: Axis) -> Vec<GridMarker> {
        let cell = self.cell_px();
        let (scroll, client) = match axis {
            Axis::Horizontal => (self.scroll_left, self.client_width),
            Axis::Vertical => (self.scroll_top, self.client_height),
        };
        if cell <= 0.0 || client <= 0.0 {
            return Vec::new();
        }
        let step = self.marker_step();
        let visible_start = (scroll / cell).floor() as i64;
        let visible_end = ((scroll + client) / cell).ceil() as i64;
        let first = visible_start.div_euclid(step) * step;
        let last = div_ceil(visible_end, step) * step;

        let mut markers = Vec::new();
        let mut value = first;
        while value <= last {
            if value > 0 {
                let percent = ((value as f32 * cell - scroll) / client) * 100.0;
                if (0.0..=100.0).contains(&percent) {
                    markers.push(GridMarker { value, percent });
                }
            }
            value += step;
        }
        markers
    }

    /// Client coordinates to unscaled workspace coordinates, given the
    /// container's bounding-rect origin.
    pub fn client_to_workspace(
        &self,
        client_x: f32,
        client_y: f32,
        rect_left: f32,
        rect_top: f32,
    ) -> (f32, f32) {
        let x = (client_x - rect_left + self.scroll_left) / self.scale;
        let y = (client_y - rect_top + self.scroll_top) / self.scale;
        (x, y)
    }

    pub fn workspace_to_client(
        &self,
        x: f32,
        y: f32,
        rect_left: f32,
        rect_top: f32,
    ) -> (f32, f32) {
        (
            x * self.scale - self.scroll_left + rect_left,
            y * self.scale - self.scroll_top + rect_top,
        )
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn round_scale(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

fn div_ceil(value: i64, step: i64) -> i64 {
    let q = value.div_euclid(step);
    if value.rem_euclid(step) == 0 {
        q
    } else {
        q + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_ceil_rounds_up() {
        assert_eq!(div_ceil(10, 5), 2);
        assert_eq!(div_ceil(11, 5), 3);
        assert_eq!(div_ceil(0, 5), 0);
    }

    #[test]
    fn marker_step_follows_scale() {
        let mut viewport = Viewport::new(&EditorConfig::default());
        assert_eq!(viewport.marker_step(), 10);
        viewport.zoom_to(0.5, 0.0, 0.0);
        assert_eq!(viewport.marker_step(), 20);
        viewport.zoom_to(3.0, 0.0, 0.0);
        assert_eq!(viewport.marker_step(), 5);
    }
}
