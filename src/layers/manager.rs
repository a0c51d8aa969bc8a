use crate::{engine::MapEngine, layers::base::LayerSpec, MapError, Result};

/// Ordered set of style layers
///
/// Layers are kept sorted by z-index; equal z-indices keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct LayerManager {
    layers: Vec<LayerSpec>,
}

/// What [`LayerManager::apply`] did
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedLayers {
    pub added: Vec<String>,
    /// Layers left out because their source is not registered
    pub skipped: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Adds a layer at its z-index position
    pub fn add_layer(&mut self, layer: LayerSpec) -> Result<()> {
        if self.get_layer(&layer.id).is_some() {
            return Err(MapError::Layer(format!("duplicate layer id '{}'", layer.id)));
        }

        // Insert in sorted order by z-index
        let insert_pos = self
            .layers
            .iter()
            .position(|l| l.z_index > layer.z_index)
            .unwrap_or(self.layers.len());

        self.layers.insert(insert_pos, layer);
        Ok(())
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    /// Gets all layers in draw order
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Layer ids in draw order
    pub fn list_layers(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Layers drawn from `source`, in draw order
    pub fn layers_for_source(&self, source: &str) -> Vec<&LayerSpec> {
        self.layers
            .iter()
            .filter(|l| l.source.as_deref() == Some(source))
            .collect()
    }

    /// Adds every layer to the engine in draw order.
    ///
    /// A layer whose source is not in `available_sources` is skipped; the
    /// remaining layers still go in, in order.
    pub fn apply<E>(&self, engine: &mut E, available_sources: &[&str]) -> Result<AppliedLayers>
    where
        E: MapEngine + ?Sized,
    {
        let mut applied = AppliedLayers::default();
        for layer in &self.layers {
            let source_ready = match (&layer.source, layer.layer_type.needs_source()) {
                (Some(source), true) => available_sources.contains(&source.as_str()),
                (None, true) => false,
                (_, false) => true,
            };
            if !source_ready {
                log::warn!(
                    "skipping layer '{}': source {:?} is not available",
                    layer.id,
                    layer.source
                );
                applied.skipped.push(layer.id.clone());
                continue;
            }
            engine.add_layer(layer)?;
            applied.added.push(layer.id.clone());
        }
        Ok(applied)
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::LayerType;

    fn layer(id: &str, z: i32) -> LayerSpec {
        LayerSpec::new(id, LayerType::Fill).source("polygons").z_index(z)
    }

    #[test]
    fn test_sorted_by_z_index_with_stable_ties() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("labels", 80)).unwrap();
        manager.add_layer(layer("outline", 10)).unwrap();
        manager.add_layer(layer("buildings", 30)).unwrap();
        manager.add_layer(layer("buildings-2", 30)).unwrap();

        assert_eq!(
            manager.list_layers(),
            vec!["outline", "buildings", "buildings-2", "labels"]
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("buildings", 30)).unwrap();
        assert!(matches!(
            manager.add_layer(layer("buildings", 40)),
            Err(MapError::Layer(_))
        ));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_lookup_by_id_and_source() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 1)).unwrap();
        manager
            .add_layer(LayerSpec::new("b", LayerType::Line).source("lines").z_index(2))
            .unwrap();

        assert_eq!(manager.layers_for_source("lines").len(), 1);
        assert_eq!(manager.get_layer("a").map(|l| l.z_index), Some(1));
        assert!(manager.get_layer("c").is_none());
    }
}
