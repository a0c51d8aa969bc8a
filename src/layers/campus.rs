//! The campus layer set, bottom to top:
//! outline fill, outline line, building fill, building outline, roads,
//! footpaths, point dots, building labels, point labels.

use crate::{
    core::constants::{LINES_SOURCE, POINTS_SOURCE, POLYGONS_SOURCE},
    layers::{
        base::{LayerSpec, LayerType},
        expression::{all, by_zoom, eq, geometry_is, get, has, lit, match_property, property_in},
        manager::LayerManager,
    },
    Result,
};
use serde_json::json;

const ROAD_CLASSES: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "service",
];

const PATH_CLASSES: &[&str] = &["footway", "path", "pedestrian", "cycleway", "steps"];

const LABEL_FONT: [&str; 2] = ["Open Sans Semibold", "Arial Unicode MS Bold"];

pub fn campus_outline_fill() -> LayerSpec {
    LayerSpec::new("campus-outline-fill", LayerType::Fill)
        .source(POLYGONS_SOURCE)
        .filter(all([geometry_is("Polygon"), eq(get("amenity"), lit("university"))]))
        .paint("fill-color", "#e4eddc")
        .paint("fill-opacity", 0.6)
        .z_index(10)
}

pub fn campus_outline() -> LayerSpec {
    LayerSpec::new("campus-outline", LayerType::Line)
        .source(POLYGONS_SOURCE)
        .filter(all([geometry_is("Polygon"), eq(get("amenity"), lit("university"))]))
        .paint("line-color", "#5a8a3a")
        .paint("line-width", 2.0)
        .paint("line-dasharray", json!([2, 1]))
        .z_index(20)
}

pub fn buildings_fill() -> LayerSpec {
    LayerSpec::new("buildings-fill", LayerType::Fill)
        .source(POLYGONS_SOURCE)
        .filter(all([geometry_is("Polygon"), has("building")]))
        .paint(
            "fill-color",
            match_property("building", &[("university", json!("#b8a98f"))], "#888888"),
        )
        .paint("fill-opacity", 0.6)
        .z_index(30)
}

pub fn buildings_outline() -> LayerSpec {
    LayerSpec::new("buildings-outline", LayerType::Line)
        .source(POLYGONS_SOURCE)
        .filter(all([geometry_is("Polygon"), has("building")]))
        .paint("line-color", "#6b6358")
        .paint("line-width", 1.0)
        .z_index(40)
}

pub fn roads() -> LayerSpec {
    LayerSpec::new("roads", LayerType::Line)
        .source(LINES_SOURCE)
        .filter(all([geometry_is("LineString"), property_in("highway", ROAD_CLASSES)]))
        .paint(
            "line-color",
            match_property(
                "highway",
                &[("primary", json!("#f4b860")), ("secondary", json!("#f4b860"))],
                "#ff0000",
            ),
        )
        .paint("line-width", by_zoom(&[(15.0, 2.0), (19.0, 10.0)]))
        .layout("line-cap", "round")
        .layout("line-join", "round")
        .z_index(50)
}

pub fn footpaths() -> LayerSpec {
    LayerSpec::new("footpaths", LayerType::Line)
        .source(LINES_SOURCE)
        .filter(all([geometry_is("LineString"), property_in("highway", PATH_CLASSES)]))
        .paint("line-color", "#8a7f72")
        .paint("line-width", by_zoom(&[(15.0, 1.0), (19.0, 3.0)]))
        .paint("line-dasharray", json!([1.5, 1]))
        .z_index(60)
}

pub fn point_dots() -> LayerSpec {
    LayerSpec::new("points", LayerType::Circle)
        .source(POINTS_SOURCE)
        .filter(geometry_is("Point"))
        .paint("circle-radius", 5.0)
        .paint("circle-color", "#0000ff")
        .z_index(70)
}

pub fn building_labels() -> LayerSpec {
    LayerSpec::new("building-labels", LayerType::Symbol)
        .source(POLYGONS_SOURCE)
        .filter(all([has("building"), has("name")]))
        .layout("text-field", get("name"))
        .layout("text-font", json!(LABEL_FONT))
        .layout("text-size", by_zoom(&[(16.0, 10.0), (19.0, 14.0)]))
        .paint("text-color", "#3d3a35")
        .paint("text-halo-color", "#ffffff")
        .paint("text-halo-width", 1.2)
        .min_zoom(16.0)
        .z_index(80)
}

pub fn point_labels() -> LayerSpec {
    LayerSpec::new("point-labels", LayerType::Symbol)
        .source(POINTS_SOURCE)
        .filter(all([geometry_is("Point"), has("name")]))
        .layout("text-field", get("name"))
        .layout("text-font", json!(LABEL_FONT))
        .layout("text-size", 11.0)
        .layout("text-offset", json!([0, 0.8]))
        .layout("text-anchor", "top")
        .paint("text-color", "#5b5346")
        .paint("text-halo-color", "#ffffff")
        .paint("text-halo-width", 1.0)
        .z_index(90)
}

/// All campus layers in draw order
pub fn campus_layers() -> Result<LayerManager> {
    let mut manager = LayerManager::new();
    for layer in [
        campus_outline_fill(),
        campus_outline(),
        buildings_fill(),
        buildings_outline(),
        roads(),
        footpaths(),
        point_dots(),
        building_labels(),
        point_labels(),
    ] {
        manager.add_layer(layer)?;
    }
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_order() {
        let manager = campus_layers().unwrap();
        assert_eq!(
            manager.list_layers(),
            vec![
                "campus-outline-fill",
                "campus-outline",
                "buildings-fill",
                "buildings-outline",
                "roads",
                "footpaths",
                "points",
                "building-labels",
                "point-labels",
            ]
        );
    }

    #[test]
    fn test_fills_precede_lines_precede_symbols() {
        let manager = campus_layers().unwrap();
        let types: Vec<LayerType> = manager.layers().iter().map(|l| l.layer_type).collect();
        let last_fill = types.iter().rposition(|t| *t == LayerType::Fill).unwrap();
        let first_symbol = types.iter().position(|t| *t == LayerType::Symbol).unwrap();
        assert!(last_fill < first_symbol);
        assert!(types[first_symbol..].iter().all(|t| *t == LayerType::Symbol));
    }

    #[test]
    fn test_every_layer_uses_a_campus_source() {
        let manager = campus_layers().unwrap();
        let per_source: usize = [LINES_SOURCE, POINTS_SOURCE, POLYGONS_SOURCE]
            .iter()
            .map(|s| manager.layers_for_source(s).len())
            .sum();
        assert_eq!(per_source, manager.len());
    }

    #[test]
    fn test_labels_read_the_name_property() {
        let layer = building_labels();
        assert_eq!(layer.layout["text-field"], json!(["get", "name"]));
        assert_eq!(layer.min_zoom, Some(16.0));
    }
}
