//! Tab selection and cross-view signals

/// The three console views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Author,
    List,
    Test,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Author => "author",
            Tab::List => "list",
            Tab::Test => "test",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "author" | "editor" => Ok(Tab::Author),
            "list" | "services" => Ok(Tab::List),
            "test" => Ok(Tab::Test),
            _ => Err(format!("Invalid tab: {}", s)),
        }
    }
}

/// Active tab, refresh counter and edit target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    active_tab: Tab,
    refresh_counter: u64,
    edit_target: Option<String>,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn refresh_counter(&self) -> u64 {
        self.refresh_counter
    }

    pub fn edit_target(&self) -> Option<&str> {
        self.edit_target.as_deref()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Ask every listing to refetch
    pub fn request_refresh(&mut self) {
        self.refresh_counter += 1;
    }

    /// Target `id` for editing and jump to the author view.
    ///
    /// Returns true if the target changed.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        self.active_tab = Tab::Author;
        if self.edit_target.as_deref() == Some(id) {
            return false;
        }
        self.edit_target = Some(id.to_string());
        true
    }

    /// Drop the edit target and return to the list; nothing changed so no refresh
    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.active_tab = Tab::List;
    }

    /// Drop the edit target after a save, refresh and return to the list
    pub fn complete_edit(&mut self) {
        self.edit_target = None;
        self.request_refresh();
        self.active_tab = Tab::List;
    }

    /// A new microservice was deployed
    pub fn deploy_succeeded(&mut self) {
        self.request_refresh();
    }
}
