//! A map surface that records layers and writes them out as GeoJSON
//!
//! Coordinates are written `[lon, lat]` as GeoJSON requires. The fitted view
//! becomes the collection's `bbox`.

use super::MapSurface;
use crate::domain::GeoPoint;
use crate::geometry::Bounds;
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A drawn layer
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker { at: GeoPoint, label: u32 },
    Polyline { from: GeoPoint, to: GeoPoint },
    Polygon { ring: Vec<GeoPoint> },
}

impl Layer {
    fn to_feature(&self, handle: u64) -> Value {
        let (kind, geometry, mut properties) = match self {
            Layer::Marker { at, label } => (
                "marker",
                json!({ "type": "Point", "coordinates": position(at) }),
                json!({ "label": label }),
            ),
            Layer::Polyline { from, to } => (
                "edge",
                json!({
                    "type": "LineString",
                    "coordinates": [position(from), position(to)],
                }),
                json!({}),
            ),
            Layer::Polygon { ring } => {
                let mut coordinates: Vec<Value> = ring.iter().map(position).collect();
                if let Some(first) = ring.first() {
                    coordinates.push(position(first));
                }
                (
                    "boundary",
                    json!({ "type": "Polygon", "coordinates": [coordinates] }),
                    json!({ "vertices": ring.len() }),
                )
            }
        };

        properties["kind"] = json!(kind);
        properties["layer"] = json!(handle);
        json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": properties,
        })
    }
}

fn position(point: &GeoPoint) -> Value {
    json!([point.lon, point.lat])
}

#[derive(Debug, Default)]
pub struct GeoJsonSurface {
    layers: BTreeMap<u64, Layer>,
    next_handle: u64,
    view: Option<Bounds>,
}

impl GeoJsonSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Live layers in drawing order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn view(&self) -> Option<&Bounds> {
        self.view.as_ref()
    }

    pub fn to_feature_collection(&self) -> Value {
        let features: Vec<Value> = self
            .layers
            .iter()
            .map(|(handle, layer)| layer.to_feature(*handle))
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some(view) = &self.view {
            collection["bbox"] = json!(view.to_bbox());
        }
        collection
    }

    /// Write the live layers to a GeoJSON file
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &self.to_feature_collection())
            .context("Failed to serialize GeoJSON")?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }

    fn insert(&mut self, layer: Layer) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.layers.insert(handle, layer);
        handle
    }
}

impl MapSurface for GeoJsonSurface {
    type Handle = u64;

    fn add_marker(&mut self, at: GeoPoint, label: u32) -> u64 {
        self.insert(Layer::Marker { at, label })
    }

    fn draw_polyline(&mut self, from: GeoPoint, to: GeoPoint) -> u64 {
        self.insert(Layer::Polyline { from, to })
    }

    fn draw_polygon(&mut self, ring: &[GeoPoint]) -> u64 {
        self.insert(Layer::Polygon {
            ring: ring.to_vec(),
        })
    }

    fn remove(&mut self, handle: u64) {
        self.layers.remove(&handle);
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.view = Some(bounds.clone());
    }
}
