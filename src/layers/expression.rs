//! Typed builders for the engine's JSON expression language.
//!
//! Only the operators the campus style needs are modelled. An [`Expr`]
//! serializes to the array form the engine expects, e.g.
//! `["match", ["get", "highway"], ["footway", "path"], true, false]`.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Feature property lookup
    Get(String),
    /// Feature has the property
    Has(String),
    /// `"Point"`, `"LineString"` or `"Polygon"`
    GeometryType,
    Zoom,
    Eq(Box<Expr>, Box<Expr>),
    All(Vec<Expr>),
    /// Input equals one of the literal labels
    OneOf(Box<Expr>, Vec<Value>),
    /// Label-to-output table with a fallback
    Match {
        input: Box<Expr>,
        arms: Vec<(Value, Value)>,
        fallback: Value,
    },
    /// Linear interpolation over `(input, output)` stops
    Interpolate {
        input: Box<Expr>,
        stops: Vec<(f64, Value)>,
    },
}

pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

pub fn get(property: &str) -> Expr {
    Expr::Get(property.to_string())
}

pub fn has(property: &str) -> Expr {
    Expr::Has(property.to_string())
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    Expr::Eq(Box::new(left), Box::new(right))
}

pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::All(exprs.into_iter().collect())
}

/// Geometry type equals `kind`
pub fn geometry_is(kind: &str) -> Expr {
    eq(Expr::GeometryType, lit(kind))
}

/// Property `property` is one of `labels`
pub fn property_in(property: &str, labels: &[&str]) -> Expr {
    Expr::OneOf(
        Box::new(get(property)),
        labels.iter().map(|l| Value::from(*l)).collect(),
    )
}

/// Output chosen by the value of `property`
pub fn match_property(
    property: &str,
    arms: &[(&str, Value)],
    fallback: impl Into<Value>,
) -> Expr {
    Expr::Match {
        input: Box::new(get(property)),
        arms: arms
            .iter()
            .map(|(label, output)| (Value::from(*label), output.clone()))
            .collect(),
        fallback: fallback.into(),
    }
}

/// Numeric output interpolated linearly over zoom
pub fn by_zoom(stops: &[(f64, f64)]) -> Expr {
    Expr::Interpolate {
        input: Box::new(Expr::Zoom),
        stops: stops.iter().map(|&(z, v)| (z, Value::from(v))).collect(),
    }
}

impl Expr {
    pub fn to_value(&self) -> Value {
        match self {
            Expr::Literal(value) => value.clone(),
            Expr::Get(property) => json!(["get", property]),
            Expr::Has(property) => json!(["has", property]),
            Expr::GeometryType => json!(["geometry-type"]),
            Expr::Zoom => json!(["zoom"]),
            Expr::Eq(left, right) => json!(["==", left.to_value(), right.to_value()]),
            Expr::All(exprs) => {
                let mut out = vec![json!("all")];
                out.extend(exprs.iter().map(Expr::to_value));
                Value::Array(out)
            }
            Expr::OneOf(input, labels) => {
                json!(["match", input.to_value(), labels, true, false])
            }
            Expr::Match {
                input,
                arms,
                fallback,
            } => {
                let mut out = vec![json!("match"), input.to_value()];
                for (label, output) in arms {
                    out.push(label.clone());
                    out.push(output.clone());
                }
                out.push(fallback.clone());
                Value::Array(out)
            }
            Expr::Interpolate { input, stops } => {
                let mut out = vec![json!("interpolate"), json!(["linear"]), input.to_value()];
                for (stop, output) in stops {
                    out.push(json!(stop));
                    out.push(output.clone());
                }
                Value::Array(out)
            }
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        expr.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_combined_filter() {
        let filter = all([geometry_is("Polygon"), has("building")]);
        assert_eq!(
            filter.to_value(),
            json!(["all", ["==", ["geometry-type"], "Polygon"], ["has", "building"]])
        );
    }

    #[test]
    fn test_property_in_uses_match() {
        let filter = property_in("highway", &["footway", "path"]);
        assert_eq!(
            filter.to_value(),
            json!(["match", ["get", "highway"], ["footway", "path"], true, false])
        );
    }

    #[test]
    fn test_match_with_fallback() {
        let color = match_property("building", &[("university", json!("#c9b79c"))], "#d6d0c4");
        assert_eq!(
            color.to_value(),
            json!(["match", ["get", "building"], "university", "#c9b79c", "#d6d0c4"])
        );
    }

    #[test]
    fn test_zoom_interpolation() {
        let width = by_zoom(&[(15.0, 2.0), (19.0, 10.0)]);
        assert_eq!(
            serde_json::to_value(&width).unwrap(),
            json!(["interpolate", ["linear"], ["zoom"], 15.0, 2.0, 19.0, 10.0])
        );
    }
}
