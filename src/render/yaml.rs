use crate::model::Registry;

/// Render the registry as YAML, keys in declaration order.
pub fn render_registry(registry: &Registry) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(registry)?)
}
