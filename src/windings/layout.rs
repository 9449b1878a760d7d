use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;
use crate::windings::{
    self,
    Bounds,
    FlattenedLoop,
    Layer,
    Loop,
    OrientationLabel,
    ProcResult,
    WindingError,
};

/// Flattened loops split by copper layer.
/// Each entry keeps the index of its source loop.
#[derive(Debug, Default)]
pub struct LayerAssignment {
    pub front: Vec<(usize, FlattenedLoop)>,
    pub back: Vec<(usize, FlattenedLoop)>,
}

/// Split flattened loops onto the front and back layers by their orientation labels.
pub fn assign_layers(flattened: Vec<FlattenedLoop>, labels: &[OrientationLabel]) -> ProcResult<LayerAssignment> {
    Ok(FlatLayout::from_labelled(Point::zero(), flattened, labels)?.layers())
}

/// One loop of the flat layout, as handed to the renderer/exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatLoopEntry {
    pub index: usize,
    pub label: OrientationLabel,
    pub layer: Layer,
    pub color: String,
    pub points: FlattenedLoop,
}

/// Flat layout struct.
/// Index-aligned flattened loops with their labels, ready for 2D rendering or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatLayout {
    pub origin: Point,
    pub loops: Vec<FlatLoopEntry>,
}
impl FlatLayout {
    /// Lay out already flattened loops with their labels, in index order.
    pub fn from_labelled(origin: Point, flattened: Vec<FlattenedLoop>, labels: &[OrientationLabel]) -> ProcResult<FlatLayout> {
        if flattened.len() != labels.len() {
            return Err(WindingError::LengthMismatch{loops: flattened.len(), labels: labels.len()});
        }
        let entries = flattened.into_iter()
            .zip(labels)
            .enumerate()
            .map(|(index, (points, label))| FlatLoopEntry{
                index,
                label: *label,
                layer: label.layer(),
                color: label.color().to_string(),
                points,
            })
            .collect();
        Ok(FlatLayout{origin, loops: entries})
    }

    /// Flatten and classify a loop set.
    /// `scale` and `offset` are applied to the flattened coordinates (scale first).
    pub fn build(loops: &[Loop], origin: Point, scale: f64, offset: [f64; 2]) -> ProcResult<FlatLayout> {
        let labels = windings::classify_loops(loops, origin);
        let flattened = windings::flatten_loops(loops).into_iter()
            .map(|flat| flat.scaled(scale).translated(offset[0], offset[1]))
            .collect();
        FlatLayout::from_labelled(origin, flattened, &labels)
    }

    /// Loops split by copper layer, with their source indices.
    pub fn layers(&self) -> LayerAssignment {
        let mut assignment = LayerAssignment::default();
        for entry in self.loops.iter() {
            let side = match entry.layer {
                Layer::Front => &mut assignment.front,
                Layer::Back => &mut assignment.back,
            };
            side.push((entry.index, entry.points.clone()));
        }
        assignment
    }

    /// Bounds covering every loop. `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.loops.iter()
            .filter_map(|entry| entry.points.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Keep only loops lying entirely inside `bounds`.
    pub fn retain_within(&mut self, bounds: &Bounds) {
        self.loops.retain(|entry| {
            entry.points.bounds().map_or(false, |b| bounds.contains(&b))
        });
    }

    /// Close every loop outline (first point repeated at the end).
    pub fn close_loops(&mut self) {
        for entry in self.loops.iter_mut() {
            entry.points = entry.points.closed();
        }
    }

    /// Count the loops on each layer as (front, back).
    pub fn layer_counts(&self) -> (usize, usize) {
        let front = self.loops.iter().filter(|entry| entry.layer == Layer::Front).count();
        (front, self.loops.len() - front)
    }
}

/// Save a flat layout as pretty JSON.
pub fn save_flat_layout<P: AsRef<Path>>(layout: &FlatLayout, output_path: P) -> ProcResult<()> {
    tracing::info!("Saving flat layout to {}...", output_path.as_ref().display());
    crate::io::write_json(output_path, layout)?;
    Ok(())
}

/// Load a flat layout from JSON.
pub fn load_flat_layout<P: AsRef<Path>>(input_path: P) -> ProcResult<FlatLayout> {
    let input_path = input_path.as_ref();
    tracing::info!("Loading flat layout from {}...", input_path.display());
    let f = crate::io::open(input_path)?;
    serde_json::from_reader(f).map_err(|error| WindingError::IoError(crate::io::IoError{
        file: Some(input_path.display().to_string()),
        cause: crate::io::IoErrorType::SerdeJson(error),
    }))
}
