//! Saving and loading mirror room experiments as JSON.

use mirror_room::*;
use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter},
    ops::Deref,
    path,
    rc::Rc,
    sync::Arc,
};

pub use serde_json;

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const D: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; D]> {
    let array: &[serde_json::Value; D] = json_array.try_into().ok()?;

    let mut coords = [0.; D];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64()?;
    }
    Some(coords)
}

pub fn json_array_to_point(json_array: &[serde_json::Value]) -> Option<Point> {
    json_array_to_float_array::<2>(json_array).map(Point::from)
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    map: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

fn field<'a>(json: &'a serde_json::Value, name: &str) -> Result<&'a serde_json::Value, Box<dyn Error>> {
    json.get(name)
        .ok_or_else(|| format!("missing field \"{name}\"").into())
}

fn point_field(json: &serde_json::Value, name: &str) -> Result<Point, Box<dyn Error>> {
    field(json, name)?
        .as_array()
        .and_then(|array| json_array_to_point(array))
        .ok_or_else(|| format!("\"{name}\" must be an array of 2 numbers").into())
}

pub trait JsonSer {
    /// Serialize `self` into a JSON value.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<const N: usize, T: JsonSer> JsonSer for [T; N] {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all
// types implementing `Deref` makes the trait unusable downstream

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Box<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Rc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Arc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<'a, T: JsonSer + ?Sized> JsonSer for &'a T {
    fn to_json(&self) -> serde_json::Value {
        (*self).to_json()
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON value.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, T::from_json)
    }
}

impl JsonSer for Point {
    /// `[x, y]`
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.x, self.y])
    }
}

impl JsonDes for Point {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        json.as_array()
            .and_then(|array| json_array_to_point(array))
            .ok_or_else(|| "a point must be an array of 2 numbers".into())
    }
}

impl JsonSer for Curvature {
    fn to_json(&self) -> serde_json::Value {
        match self {
            Curvature::Concave => "concave",
            Curvature::Convex => "convex",
        }
        .into()
    }
}

impl JsonDes for Curvature {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        match json.as_str().ok_or("curvature must be a string")? {
            "concave" => Ok(Curvature::Concave),
            "convex" => Ok(Curvature::Convex),
            other => Err(format!("unknown curvature: {other}").into()),
        }
    }
}

impl JsonSer for MirrorKind {
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        match self {
            MirrorKind::Flat => serde_json::json!({ "type": "flat" }),
            MirrorKind::Spherical { curvature, radius } => serde_json::json!({
                "type": "spherical",
                "curvature": curvature.to_json(),
                "radius": radius,
            }),
        }
    }
}

impl JsonDes for MirrorKind {
    /// Deserialize a mirror kind from a JSON object of one of these forms:
    ///
    /// ```json
    /// { "type": "flat" }
    /// { "type": "spherical", "curvature": "concave" | "convex", "radius": 100.0 }
    /// ```
    ///
    /// The radius must be positive.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let mirror_type = field(json, "type")?
            .as_str()
            .ok_or("mirror type must be a string")?;

        match mirror_type {
            "flat" => Ok(MirrorKind::Flat),
            "spherical" => {
                let curvature = Curvature::from_json(field(json, "curvature")?)?;
                let radius = field(json, "radius")?
                    .as_f64()
                    .ok_or("radius must be a number")?;
                Ok(MirrorKind::spherical(curvature, radius)?)
            }
            other => Err(format!("invalid mirror type: {other}").into()),
        }
    }
}

impl JsonSer for Wall {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start().to_json(),
            "end": self.end().to_json(),
            "mirror": self.mirror().to_json(),
        })
    }
}

impl JsonDes for Wall {
    /// Deserialize a wall from a JSON object.
    ///
    /// ```json
    /// {
    ///     "start": [0., 0.],
    ///     "end": [400., 0.],
    ///     "mirror": { "type": "flat" } // optional, flat by default
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let wall = Wall::new(point_field(json, "start")?, point_field(json, "end")?);

        Ok(match json.get("mirror") {
            Some(mirror) => wall.with_mirror(MirrorKind::from_json(mirror)?),
            None => wall,
        })
    }
}

impl JsonSer for Room {
    /// An array of walls
    fn to_json(&self) -> serde_json::Value {
        self.walls().to_json()
    }
}

impl JsonDes for Room {
    /// The walls must form a closed polygon, see [`Room::from_walls`]
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        Ok(Room::from_walls(Vec::from_json(json)?)?)
    }
}

impl JsonSer for Path {
    /// An array of points
    fn to_json(&self) -> serde_json::Value {
        self.points().to_json()
    }
}

impl JsonSer for Experiment {
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "walls": self.room.to_json(),
            "origin": self.origin.to_json(),
            "angle_degrees": self.angle.degrees(),
            "max_reflections": self.max_reflections,
        })
    }
}

impl JsonDes for Experiment {
    /// Deserialize an experiment from a JSON object.
    ///
    /// ```json
    /// {
    ///     "walls": [ ... ], // (at least 4 walls, forming a closed polygon)
    ///     "origin": [200., 200.],
    ///     "angle_degrees": 90.,
    ///     "max_reflections": 50 // optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let room = Room::from_json(field(json, "walls")?)?;
        let origin = point_field(json, "origin")?;

        let angle = field(json, "angle_degrees")?
            .as_f64()
            .ok_or("\"angle_degrees\" must be a number")?;

        let experiment = Experiment::new(room, origin, Angle::from_degrees(angle));

        Ok(match json.get("max_reflections") {
            Some(max) => experiment.with_max_reflections(
                max.as_u64()
                    .ok_or("\"max_reflections\" must be a non-negative integer")?
                    .try_into()?,
            ),
            None => experiment,
        })
    }
}

pub fn save_experiment(
    path: impl AsRef<path::Path>,
    experiment: &Experiment,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &experiment.to_json())?;
    log::info!("saved experiment to {}", path.display());
    Ok(())
}

pub fn load_experiment(path: impl AsRef<path::Path>) -> Result<Experiment, Box<dyn Error>> {
    let path = path.as_ref();
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let experiment = Experiment::from_json(&json)?;
    log::info!(
        "loaded experiment with {} walls from {}",
        experiment.room.len(),
        path.display()
    );
    Ok(experiment)
}
