//! Scribe Templates — prompt template registry
//!
//! Built-in templates are defined in builtin.rs.
//! To add a template: define it there (or in config), register it below.
//! The generation pipeline reads definitions only through the registry, so
//! adding or changing parameters never touches it.

pub mod builtin;
pub mod registry;
pub mod render;

pub use registry::{ParamSpec, TemplateDefinition, TemplateRegistry};
pub use render::{placeholders, render, RenderError};

use scribe_core::config::TemplatesConfig;

/// Create the default registry: story, marketing, outline, freeform.
pub fn create_default_registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    registry.register(builtin::story());
    registry.register(builtin::marketing());
    registry.register(builtin::outline());
    registry.register(builtin::freeform());
    registry
}

/// Create the registry whose story, marketing and outline templates also take
/// the shared `setting` parameter.
pub fn create_setting_registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    registry.register(builtin::story_with_setting());
    registry.register(builtin::marketing_with_setting());
    registry.register(builtin::outline_with_setting());
    registry.register(builtin::freeform());
    registry
}

/// Create the registry selected by configuration, with custom templates appended.
///
/// Invalid custom templates are skipped. A custom template with a built-in id
/// replaces the built-in.
pub fn create_registry(config: &TemplatesConfig) -> TemplateRegistry {
    let mut registry = if config.with_setting {
        create_setting_registry()
    } else {
        create_default_registry()
    };

    for custom in &config.custom {
        match TemplateDefinition::try_from(custom) {
            Ok(def) => {
                tracing::debug!("Registered custom template '{}'", def.id());
                registry.register(def);
            }
            Err(e) => tracing::warn!("Skipping custom template: {}", e),
        }
    }

    registry
}
