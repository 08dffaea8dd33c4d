use super::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A plantation record as stored by the backend
///
/// Coordinates arrive as two parallel arrays. Entries are kept as raw JSON
/// values because older records hold numeric strings or garbage.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Plantation {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub crop_type: String,
    #[serde(default)]
    pub pontosx: Vec<Value>,
    #[serde(default)]
    pub pontosy: Vec<Value>,
}

impl Plantation {
    /// Resolve the stored parallel arrays to points
    ///
    /// Pairs with a missing, non-numeric or non-finite side are skipped
    /// individually; the rest load in array order.
    pub fn boundary_points(&self) -> Vec<GeoPoint> {
        let points = parse_parallel_arrays(&self.pontosx, &self.pontosy);
        let pairs = self.pontosx.len().max(self.pontosy.len());
        if points.len() < pairs {
            log::warn!(
                "skipped {} malformed coordinate pair(s) in plantation {:?}",
                pairs - points.len(),
                self.name
            );
        }
        points
    }

    /// Identifier rendered the way the backend expects it in a URL path
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Parse two parallel coordinate arrays into points, skipping bad pairs
pub fn parse_parallel_arrays(xs: &[Value], ys: &[Value]) -> Vec<GeoPoint> {
    xs.iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| {
            let point = GeoPoint::new(parse_coordinate(x)?, parse_coordinate(y)?);
            point.is_finite().then_some(point)
        })
        .collect()
}

fn parse_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("plantation name is required")]
    MissingName,
    #[error("crop type is required")]
    MissingCropType,
    #[error("a boundary needs at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// Outbound create/update body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlantationDraft {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub crop_type: String,
    pub pontosx: Vec<f64>,
    pub pontosy: Vec<f64>,
}

impl PlantationDraft {
    pub fn new(
        name: &str,
        crop_type: &str,
        pontosx: Vec<f64>,
        pontosy: Vec<f64>,
    ) -> Result<Self, DraftError> {
        let name = name.trim();
        let crop_type = crop_type.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        if crop_type.is_empty() {
            return Err(DraftError::MissingCropType);
        }
        let count = pontosx.len().min(pontosy.len());
        if count < 3 {
            return Err(DraftError::TooFewPoints(count));
        }

        Ok(Self {
            name: name.to_string(),
            crop_type: crop_type.to_string(),
            pontosx,
            pontosy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plantation_with_mixed_coordinates() {
        let json = r#"{
            "id": 12,
            "nome": "Talhao Norte",
            "tipo": "Cafe",
            "pontosx": [-22.1, "-22.2", "abc", null, -22.3],
            "pontosy": [-47.1, -47.2, -47.3, -47.4]
        }"#;
        let plantation: Plantation = serde_json::from_str(json).unwrap();
        let points = plantation.boundary_points();

        assert_eq!(
            points,
            vec![GeoPoint::new(-22.1, -47.1), GeoPoint::new(-22.2, -47.2)]
        );
        assert_eq!(plantation.id_string().as_deref(), Some("12"));
    }

    #[test]
    fn test_parse_parallel_arrays_skips_non_finite() {
        let xs = vec![json!(1.0), json!("inf"), json!(" 3.5 ")];
        let ys = vec![json!(2.0), json!(4.0), json!("7")];
        let points = parse_parallel_arrays(&xs, &ys);
        assert_eq!(points, vec![GeoPoint::new(1.0, 2.0), GeoPoint::new(3.5, 7.0)]);
    }

    #[test]
    fn test_missing_fields_default() {
        let plantation: Plantation = serde_json::from_str("{}").unwrap();
        assert!(plantation.boundary_points().is_empty());
        assert_eq!(plantation.id_string(), None);
    }

    #[test]
    fn test_draft_validation() {
        let xs = vec![0.0, 1.0, 1.0];
        let ys = vec![0.0, 0.0, 1.0];

        assert_eq!(
            PlantationDraft::new(" ", "Soja", xs.clone(), ys.clone()),
            Err(DraftError::MissingName)
        );
        assert_eq!(
            PlantationDraft::new("Lote 3", "", xs.clone(), ys.clone()),
            Err(DraftError::MissingCropType)
        );
        assert_eq!(
            PlantationDraft::new("Lote 3", "Soja", vec![0.0], vec![0.0]),
            Err(DraftError::TooFewPoints(1))
        );

        let draft = PlantationDraft::new(" Lote 3 ", "Soja", xs, ys).unwrap();
        assert_eq!(draft.name, "Lote 3");
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["nome"], "Lote 3");
        assert_eq!(body["tipo"], "Soja");
        assert_eq!(body["pontosx"], json!([0.0, 1.0, 1.0]));
    }
}
