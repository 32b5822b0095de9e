//! Authoring form and create/update publishing

use console_api::{Language, Microservice, MicroserviceRequest};
use tracing::{debug, info};

use crate::cache::microservices::MicroserviceCache;
use crate::editor::template::{
    transition, ContentOrigin, TemplateChoice, TemplateEvent, TemplateKind, TemplateState,
};
use crate::errors::ConsoleError;
use crate::http::backend::ConsoleBackend;

/// Whether the editor creates a new microservice or replaces an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    Created(Microservice),
    Updated(Microservice),
}

/// The authoring form
#[derive(Debug, Clone)]
pub struct Editor {
    name: String,
    code: String,
    is_roble: bool,
    language: Language,
    mode: EditorMode,
    original_name: Option<String>,
    loaded_for: Option<String>,
    content: ContentOrigin,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// A create-mode form holding the Roble starter
    pub fn new() -> Self {
        let kind = TemplateKind::for_flag(true);
        Self {
            name: String::new(),
            code: kind.source().to_string(),
            is_roble: true,
            language: Language::Python,
            mode: EditorMode::Create,
            original_name: None,
            loaded_for: None,
            content: ContentOrigin::Template(kind),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_roble(&self) -> bool {
        self.is_roble
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    /// Name of the microservice being edited, as loaded
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Id whose code the form currently holds, set only by a successful preload
    pub fn loaded_for(&self) -> Option<&str> {
        self.loaded_for.as_deref()
    }

    pub fn content_origin(&self) -> ContentOrigin {
        self.content
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the code with operator text
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.content = ContentOrigin::UserEdited;
    }

    /// Flip the capability flag, swapping the starter template in create mode
    pub fn set_roble(&mut self, is_roble: bool) {
        if is_roble == self.is_roble {
            return;
        }
        let choice = transition(self.template_state(), TemplateEvent::FlagToggled(is_roble));
        self.is_roble = is_roble;
        self.apply(choice);
    }

    /// Switch to edit mode for `id` and preload its code.
    ///
    /// The mode follows the target even if the preload fails; the form is
    /// emptied first so it never holds another entity's code.
    pub async fn load_for_edit(
        &mut self,
        id: &str,
        cache: &MicroserviceCache,
    ) -> Result<(), ConsoleError> {
        self.mode = EditorMode::Edit { id: id.to_string() };
        self.name.clear();
        self.code.clear();
        self.original_name = None;
        self.loaded_for = None;
        self.content = ContentOrigin::Loaded;

        let code = cache.fetch_code(id).await?;
        info!("Loaded code of {} for editing", code.name);

        self.name = code.name.clone();
        self.code = code.code;
        self.is_roble = code.is_roble;
        self.original_name = Some(code.name);
        if let Some(language) = code.language {
            self.language = language;
        }
        self.loaded_for = Some(id.to_string());
        Ok(())
    }

    /// Leave edit mode without publishing
    pub fn enter_create_mode(&mut self) {
        if self.is_edit_mode() {
            self.reset();
            return;
        }
        let choice = transition(self.template_state(), TemplateEvent::CreateModeEntered);
        self.apply(choice);
    }

    /// Client-side name check mirroring what the backend accepts
    pub fn name_warning(&self) -> Option<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        (!valid).then(|| {
            format!(
                "'{}' may be rejected: use only letters, digits, '-' and '_'",
                name
            )
        })
    }

    /// Build the request body, rejecting blank name or code
    pub fn validate(&self) -> Result<MicroserviceRequest, ConsoleError> {
        if let EditorMode::Edit { id } = &self.mode {
            if self.loaded_for.as_deref() != Some(id.as_str()) {
                return Err(ConsoleError::validation(format!(
                    "code of '{}' has not been loaded",
                    id
                )));
            }
        }
        if self.name.trim().is_empty() || self.code.trim().is_empty() {
            return Err(ConsoleError::validation("name and code are required"));
        }
        Ok(MicroserviceRequest {
            name: self.name.clone(),
            code: self.code.clone(),
            language: self.language,
            is_roble: self.is_roble,
        })
    }

    /// Create or update, then reset the form to a fresh template
    pub async fn publish(
        &mut self,
        backend: &dyn ConsoleBackend,
    ) -> Result<PublishOutcome, ConsoleError> {
        let request = self.validate()?;

        let outcome = match &self.mode {
            EditorMode::Create => {
                debug!("Creating microservice {}", request.name);
                let created = backend.create_microservice(&request).await?;
                info!("Created microservice {} ({})", created.name, created.id);
                PublishOutcome::Created(created)
            }
            EditorMode::Edit { id } => {
                debug!("Updating microservice {}", id);
                let updated = backend.update_microservice(id, &request).await?;
                info!("Updated microservice {} ({})", updated.name, updated.id);
                PublishOutcome::Updated(updated)
            }
        };

        self.reset();
        Ok(outcome)
    }

    fn reset(&mut self) {
        self.name.clear();
        self.original_name = None;
        self.loaded_for = None;
        self.mode = EditorMode::Create;
        let choice = transition(self.template_state(), TemplateEvent::FormReset);
        self.apply(choice);
    }

    fn template_state(&self) -> TemplateState {
        TemplateState {
            editing_existing: self.is_edit_mode(),
            content: self.content,
            is_roble: self.is_roble,
        }
    }

    fn apply(&mut self, choice: TemplateChoice) {
        if let TemplateChoice::Load(kind) = choice {
            debug!("Loading the {} template", kind.name());
            self.code = kind.source().to_string();
            self.content = ContentOrigin::Template(kind);
        }
    }
}
