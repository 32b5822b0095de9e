//! Terminal rendering

use colored::{ColoredString, Colorize};
use console_api::{Microservice, MicroserviceStatus};

use crate::dispatch::action::ActionKind;
use crate::dispatch::busy::BusyView;
use crate::editor::publisher::Editor;
use crate::invoke::report::InvocationReport;
use crate::notify::{Notification, Severity};
use crate::utils::truncate;

fn status_label(status: MicroserviceStatus) -> ColoredString {
    match status {
        MicroserviceStatus::Running => status.as_str().green(),
        MicroserviceStatus::Stopped | MicroserviceStatus::Exited => status.as_str().yellow(),
        MicroserviceStatus::Error | MicroserviceStatus::Unknown => status.as_str().red(),
    }
}

/// Render the listing with the actions each row offers
pub fn render_list(microservices: &[Microservice], busy: &BusyView) -> String {
    if microservices.is_empty() {
        return "No microservices deployed. Use `create` or the author tab to add one.".to_string();
    }

    let mut out = String::new();
    for ms in microservices {
        let created = ms
            .created_at_parsed()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| ms.created_at.clone());
        let roble = if ms.is_roble { " roble" } else { "" };

        out.push_str(&format!(
            "{} [{}] {}{}\n",
            ms.name.bold(),
            status_label(ms.status),
            ms.language,
            roble.cyan()
        ));
        out.push_str(&format!("    id:       {}\n", ms.id));
        out.push_str(&format!("    endpoint: {}\n", ms.endpoint));
        out.push_str(&format!("    created:  {}\n", created));

        let actions = if busy.is_busy(&ms.id) {
            "busy, controls disabled".dimmed().to_string()
        } else {
            let mut offered: Vec<&str> = vec!["edit"];
            offered.extend(ActionKind::available_for(ms.status).iter().map(|a| a.as_str()));
            offered.join(" | ")
        };
        out.push_str(&format!("    actions:  {}\n", actions));
    }
    out
}

/// One line per notification
pub fn render_notification(notification: &Notification) -> String {
    let title = match notification.severity {
        Severity::Info => notification.title.green(),
        Severity::Warning => notification.title.yellow(),
        Severity::Error => notification.title.red().bold(),
    };
    match &notification.description {
        Some(description) => format!("{}: {}", title, description),
        None => title.to_string(),
    }
}

/// Status line followed by the response body
pub fn render_report(report: &InvocationReport) -> String {
    let status = match report.status {
        Some(code) if report.is_success() => format!("HTTP {}", code).green(),
        Some(code) => format!("HTTP {}", code).red(),
        None => "no response".red(),
    };
    format!("{}\n{}", status, report.body)
}

/// Summary of the authoring form
pub fn render_editor(editor: &Editor) -> String {
    let mode = match editor.original_name() {
        Some(name) => format!("editing {}", name.bold()),
        None if editor.is_edit_mode() => "editing".to_string(),
        None => "new microservice".to_string(),
    };
    let first_line = editor
        .code()
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    format!(
        "{}\n    name:  {}\n    roble: {}\n    code:  {} ({} lines)\n",
        mode,
        editor.name(),
        editor.is_roble(),
        truncate(first_line.trim(), 60),
        editor.code().lines().count()
    )
}
