//! The console: views composed behind the shell's signals

use std::sync::Arc;

use console_api::Microservice;
use tracing::{debug, info};

use crate::cache::microservices::MicroserviceCache;
use crate::dispatch::action::ActionKind;
use crate::dispatch::busy::BusyView;
use crate::dispatch::dispatcher::{ActionDispatcher, ActionTicket, DispatcherOptions};
use crate::editor::publisher::{Editor, PublishOutcome};
use crate::errors::ConsoleError;
use crate::http::backend::ConsoleBackend;
use crate::invoke::panel::TestPanel;
use crate::invoke::report::InvocationReport;
use crate::notify::{Notification, NotificationQueue};
use crate::shell::state::{ShellState, Tab};

/// Operator console state.
///
/// Components report failures as notifications; nothing here is fatal.
pub struct Console {
    backend: Arc<dyn ConsoleBackend>,
    cache: Arc<MicroserviceCache>,
    dispatcher: ActionDispatcher,
    editor: Editor,
    test_panel: TestPanel,
    shell: ShellState,
    notifications: NotificationQueue,
    listed_at_refresh: Option<u64>,
}

impl Console {
    /// Create a console over `backend`
    pub fn new(backend: Arc<dyn ConsoleBackend>, dispatcher_options: DispatcherOptions) -> Self {
        let cache = Arc::new(MicroserviceCache::new(backend.clone()));
        let dispatcher = ActionDispatcher::new(backend.clone(), cache.clone(), dispatcher_options);

        Self {
            backend,
            cache,
            dispatcher,
            editor: Editor::new(),
            test_panel: TestPanel::new(),
            shell: ShellState::new(),
            notifications: NotificationQueue::default(),
            listed_at_refresh: None,
        }
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    pub fn cache(&self) -> &MicroserviceCache {
        &self.cache
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn test_panel(&self) -> &TestPanel {
        &self.test_panel
    }

    pub fn test_panel_mut(&mut self) -> &mut TestPanel {
        &mut self.test_panel
    }

    /// Ids whose controls are disabled
    pub fn busy(&self) -> BusyView {
        self.dispatcher.busy()
    }

    /// The last good listing
    pub fn microservices(&self) -> Arc<Vec<Microservice>> {
        self.cache.snapshot()
    }

    /// Take the notifications raised since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.shell.select_tab(tab);
    }

    /// Refetch the list if the refresh counter moved since the last fetch
    pub async fn sync(&mut self) {
        let counter = self.shell.refresh_counter();
        if self.listed_at_refresh == Some(counter) {
            return;
        }
        debug!("Refresh counter at {}, refetching", counter);
        self.refresh().await;
    }

    /// Refetch the list now; a failure keeps the previous list
    pub async fn refresh(&mut self) {
        let counter = self.shell.refresh_counter();
        match self.cache.list().await {
            Ok(_) => self.listed_at_refresh = Some(counter),
            Err(e) => self
                .notifications
                .push(Notification::from_error("Could not load microservices", &e)),
        }
    }

    /// Target `id` for editing, preloading its code if the target changed
    /// or the previous preload failed.
    ///
    /// Ids with an action in flight are refused.
    pub async fn begin_edit(&mut self, id: &str) {
        if self.dispatcher.busy().is_busy(id) {
            debug!("Not editing {}, action in flight", id);
            let err = ConsoleError::Busy(id.to_string());
            self.notifications
                .push(Notification::from_error("Could not edit", &err));
            return;
        }
        let changed = self.shell.begin_edit(id);
        if !changed && self.editor.loaded_for() == Some(id) {
            return;
        }
        match self.editor.load_for_edit(id, &self.cache).await {
            Ok(()) => {
                let name = self.editor.original_name().unwrap_or(id).to_string();
                self.notifications
                    .push(Notification::info("Edit mode").with_description(format!("Loaded code of {}", name)));
            }
            Err(e) => self
                .notifications
                .push(Notification::from_error("Could not load code", &e)),
        }
    }

    /// Abandon the edit and return to the list without refreshing
    pub fn cancel_edit(&mut self) {
        info!("Edit cancelled");
        self.shell.cancel_edit();
        self.editor.enter_create_mode();
    }

    /// Publish the editor's content and propagate the refresh
    pub async fn publish(&mut self) -> Option<PublishOutcome> {
        if let Some(warning) = self.editor.name_warning() {
            self.notifications.push(Notification::warning("Check the name", warning));
        }

        let context = if self.editor.is_edit_mode() {
            "Update failed"
        } else {
            "Deploy failed"
        };

        let outcome = match self.editor.publish(self.backend.as_ref()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notifications.push(Notification::from_error(context, &e));
                return None;
            }
        };

        match &outcome {
            PublishOutcome::Created(ms) => {
                self.notifications
                    .push(Notification::info("Microservice deployed").with_description(ms.name.clone()));
                self.shell.deploy_succeeded();
            }
            PublishOutcome::Updated(ms) => {
                self.notifications
                    .push(Notification::info("Microservice updated").with_description(ms.name.clone()));
                self.shell.complete_edit();
            }
        }

        self.sync().await;
        Some(outcome)
    }

    /// Issue a lifecycle action; reconciliation continues in the background
    pub async fn dispatch(&mut self, id: &str, action: ActionKind) -> Option<ActionTicket> {
        match self.dispatcher.dispatch(id, action).await {
            Ok(ticket) => {
                self.notifications.push(
                    Notification::info("Action completed")
                        .with_description(format!("Action '{}' sent.", action)),
                );
                Some(ticket)
            }
            Err(e) => {
                self.notifications
                    .push(Notification::from_error(&format!("Action '{}'", action), &e));
                None
            }
        }
    }

    /// Send the test panel's request
    pub async fn run_test(&mut self) -> Option<InvocationReport> {
        match self.test_panel.submit(&self.cache, self.backend.as_ref()).await {
            Ok(report) => {
                self.notifications.push(report.notification.clone());
                Some(report)
            }
            Err(e) => {
                self.notifications.push(Notification::from_error("Test", &e));
                None
            }
        }
    }

    /// Abort pending reconciliations
    pub fn shutdown(&self) {
        self.dispatcher.shutdown();
    }
}
