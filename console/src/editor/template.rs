//! Starter templates and the rules for swapping them

/// Starter for functions that talk to Roble on behalf of a project
pub const ROBLE_TEMPLATE: &str = r#"
def login(client, payload):
    email = payload.get('email')
    password = payload.get('password')
    project_id = client.project_id

    if not email or not password:
        raise ValueError("'email' and 'password' are required in the payload.")
    if not project_id:
        raise ValueError("A project identifier is required.")

    auth_url = f"https://roble-api.openlab.uninorte.edu.co/auth/{project_id}/login"

    response = client.http.post(auth_url, json={'email': email, 'password': password})
    response.raise_for_status()

    return response.json()
"#;

/// Starter for self-contained functions
pub const PLAIN_TEMPLATE: &str = r#"
def sum_from_json(payload):
    a = payload.get('a', 0)
    b = payload.get('b', 0)

    if not isinstance(a, (int, float)) or not isinstance(b, (int, float)):
        raise TypeError("'a' and 'b' must be numbers.")

    return {"result": a + b}
"#;

/// The two named starter templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Roble,
    Plain,
}

impl TemplateKind {
    /// Template matching the capability flag
    pub fn for_flag(is_roble: bool) -> Self {
        if is_roble {
            TemplateKind::Roble
        } else {
            TemplateKind::Plain
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            TemplateKind::Roble => ROBLE_TEMPLATE,
            TemplateKind::Plain => PLAIN_TEMPLATE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Roble => "roble",
            TemplateKind::Plain => "plain",
        }
    }
}

/// Where the code currently in the editor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Untouched starter template
    Template(TemplateKind),

    /// Hand-edited by the operator
    UserEdited,

    /// Preloaded from an existing microservice
    Loaded,
}

impl ContentOrigin {
    pub fn has_user_edited(&self) -> bool {
        *self == ContentOrigin::UserEdited
    }
}

/// Inputs to a template decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateState {
    pub editing_existing: bool,
    pub content: ContentOrigin,
    pub is_roble: bool,
}

/// Something that may change the editor's code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEvent {
    /// Operator flipped the capability flag to the given value
    FlagToggled(bool),

    /// Form cleared after a successful publish
    FormReset,

    /// Editor returned to create mode
    CreateModeEntered,
}

/// What to do with the editor's code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateChoice {
    Keep,
    Load(TemplateKind),
}

/// Template transition table.
///
/// Editing an existing microservice never swaps code. In create mode an
/// explicit flag toggle always loads the matching template, discarding
/// hand edits too. Returning to create mode only replaces code that is not
/// the operator's own.
pub fn transition(state: TemplateState, event: TemplateEvent) -> TemplateChoice {
    use ContentOrigin::*;
    use TemplateEvent::*;

    if state.editing_existing {
        return TemplateChoice::Keep;
    }

    let wanted = TemplateKind::for_flag(state.is_roble);
    match (event, state.content) {
        (FlagToggled(flag), Template(_)) => TemplateChoice::Load(TemplateKind::for_flag(flag)),
        (FlagToggled(flag), UserEdited) => TemplateChoice::Load(TemplateKind::for_flag(flag)),
        (FlagToggled(flag), Loaded) => TemplateChoice::Load(TemplateKind::for_flag(flag)),

        (FormReset, _) => TemplateChoice::Load(wanted),

        (CreateModeEntered, Template(kind)) if kind == wanted => TemplateChoice::Keep,
        (CreateModeEntered, Template(_)) => TemplateChoice::Load(wanted),
        (CreateModeEntered, UserEdited) => TemplateChoice::Keep,
        (CreateModeEntered, Loaded) => TemplateChoice::Load(wanted),
    }
}
