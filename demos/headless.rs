use campusmap::{
    data::fetcher::StaticFetcher,
    engine::{headless::HeadlessFactory, MapEngine},
    ui::{dom::HeadlessDom, ids},
    CampusApp, CampusConfig, FeatureCollection,
};
use serde_json::json;

/// Walks through a campus map session without a browser
fn main() -> campusmap::Result<()> {
    env_logger::init();

    println!("🗺️ Campus Map Headless Example");
    println!("==============================");

    let polygons = FeatureCollection::from_value(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "building": "university", "name": "Library" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-81.3012, 28.5936], [-81.3006, 28.5936],
                    [-81.3006, 28.5940], [-81.3012, 28.5940],
                    [-81.3012, 28.5936]
                ]]
            }
        }]
    }))?;

    let config = CampusConfig::default();
    let fetcher = StaticFetcher::new()
        .with(&config.data.polygons, polygons)
        .with(&config.data.lines, FeatureCollection::empty())
        .failing(&config.data.points, "not exported yet");

    let factory = HeadlessFactory::new();
    let dom = HeadlessDom::with_elements(ids::ALL);
    let mut app = CampusApp::new(config, factory.clone(), dom);
    app.render()?;

    // Entry button
    let report = futures::executor::block_on(app.enter_and_load(&fetcher))?;
    if let Some(report) = report {
        for entry in &report.entries {
            println!("   {:<10} {:?}", entry.dataset, entry.outcome);
        }
    }
    println!("   Status: {:?}", app.dom().text(ids::MAP_STATUS));

    if let Some(engine) = factory.latest() {
        println!("\n✅ Style layers:");
        for id in engine.layer_ids() {
            println!("   - {}", id);
        }
        println!("   Fitted zoom: {:.2}", engine.zoom());
    }

    println!("\n🎯 Flying to buildings:");
    for name in ["Building 1", "Library", "Observatory"] {
        match app.select_building(name) {
            Ok(options) => println!(
                "   📍 {} -> {:.4}, {:.4} at zoom {}",
                name, options.center.lng, options.center.lat, options.zoom
            ),
            Err(err) => println!("   ⚠️ {}", err),
        }
    }

    println!("\n🔍 Marker scale by zoom:");
    for zoom in [15.0, 16.0, 17.5, 19.0] {
        if let Some(scale) = app.handle_zoom(zoom)? {
            println!("   zoom {:>4} -> scale {:.2}", zoom, scale);
        }
    }

    let open = app.toggle_glossary()?;
    println!(
        "\n📖 Glossary open: {} ({:?})",
        open,
        app.dom().text(ids::GLOSSARY_TOGGLE)
    );

    Ok(())
}
