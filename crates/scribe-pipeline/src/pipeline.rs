//! Generation pipeline
//!
//! credential check → client construction → template resolution →
//! parameter validation → rendering → one remote call → extraction.
//! Every failure becomes a `Failure` value; `generate` never returns `Err`.

use crate::classify::classify_error;
use crate::messages;
use crate::validate::validate_params;
use scribe_core::config::{ApiConfig, ScribeConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use scribe_core::{Credential, Failure, GenerationResult, ParameterSet};
use scribe_llm::{ChatRequest, LlmError, MoonshotConnector, ProviderConnector};
use scribe_templates::{create_registry, render, TemplateRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed sampling settings sent with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&ApiConfig> for GenerationSettings {
    fn from(api: &ApiConfig) -> Self {
        Self {
            model: api.model.clone(),
            temperature: api.temperature,
            max_tokens: api.max_tokens,
        }
    }
}

pub struct Pipeline {
    registry: TemplateRegistry,
    connector: Arc<dyn ProviderConnector>,
    settings: GenerationSettings,
}

impl Pipeline {
    pub fn new(registry: TemplateRegistry, connector: impl ProviderConnector + 'static) -> Self {
        Self {
            registry,
            connector: Arc::new(connector),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Registry, connector and settings as configured.
    pub fn from_config(config: &ScribeConfig) -> Self {
        Self::new(
            create_registry(&config.templates),
            MoonshotConnector::from_config(&config.api),
        )
        .with_settings(GenerationSettings::from(&config.api))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Resolve, validate and render without any network work.
    pub fn prepare_prompt(&self, template_id: &str, params: &ParameterSet) -> Result<String, Failure> {
        let template = self
            .registry
            .resolve(template_id)
            .ok_or_else(messages::unknown_template)?;

        let validated = validate_params(template, params).map_err(|names| {
            let labels = template.labels_for(&names);
            messages::invalid_parameters(names, &labels)
        })?;

        render(template.pattern(), validated.as_map()).map_err(|e| {
            warn!("Template '{}' failed to render: {}", template_id, e);
            messages::template_render_error(e)
        })
    }

    /// Run one generation. Always returns a result; never panics past this boundary.
    pub async fn generate(
        &self,
        credential: &str,
        template_id: &str,
        params: &ParameterSet,
    ) -> GenerationResult {
        let result = self.try_generate(credential, template_id, params).await;
        match &result {
            Ok(text) => info!("Generated {} chars with template '{}'", text.chars().count(), template_id),
            Err(failure) => warn!("Generation failed ({}): {}", failure.kind, failure.message),
        }
        result.into()
    }

    async fn try_generate(
        &self,
        credential: &str,
        template_id: &str,
        params: &ParameterSet,
    ) -> Result<String, Failure> {
        let credential = Credential::parse(credential).ok_or_else(messages::invalid_credential_format)?;

        let provider = self
            .connector
            .connect(credential.expose())
            .map_err(|e| match e {
                LlmError::ClientInit(detail) => messages::client_init_failure(detail),
                other => messages::client_init_failure(other),
            })?;

        let prompt = self.prepare_prompt(template_id, params)?;
        debug!("Rendered prompt for '{}': {} chars", template_id, prompt.chars().count());

        let request = ChatRequest::single_user(
            self.settings.model.clone(),
            prompt,
            self.settings.temperature,
            self.settings.max_tokens,
        );

        let response = provider
            .complete(request)
            .await
            .map_err(|e| classify_error(&e))?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| messages::remote_error("empty response"))
    }
}
