//! Plain-text rendering of the view model.

use std::fmt::Write;

use alerts_core::{
    AppViewModel, DetailRender, DetailView, Label, ModalBody, ModalView, Pagination,
    SearchStatus, SearchView, Sender,
};

const LOADING_ALERTS: &str = "Loading alerts...";
const NO_ALERTS: &str = "No alerts match this search.";

/// Renders every mounted component, the modal last so it reads as "on top".
pub fn render(view: &AppViewModel) -> String {
    let mut sections = Vec::new();
    if let Some(search) = &view.search {
        sections.push(render_search(search));
    }
    if let Some(detail) = &view.detail {
        sections.push(render_detail(detail));
    }
    if let Some(modal) = &view.modal {
        sections.push(render_modal(modal));
    }
    sections.retain(|section| !section.is_empty());
    let mut out = sections.join("\n");
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn render_search(view: &SearchView) -> String {
    let mut out = String::new();
    match view.status {
        SearchStatus::Loading => {
            if view.show_loader {
                out.push_str(LOADING_ALERTS);
                out.push('\n');
            }
        }
        SearchStatus::Failed => {
            for error in &view.errors {
                let _ = writeln!(out, "! {error}");
            }
        }
        SearchStatus::Loaded => {
            if view.hits.is_empty() {
                out.push_str(NO_ALERTS);
                out.push('\n');
            }
            for (position, hit) in view.hits.iter().enumerate() {
                let info = &hit.info;
                let _ = writeln!(
                    out,
                    "{:>3}. {} [{}/{}] {}",
                    position + 1,
                    info.headline,
                    info.severity,
                    info.urgency,
                    info.sender_name
                );
            }
        }
    }
    out.push_str(&render_pagination(&view.pagination));
    out.push('\n');
    out
}

fn render_pagination(pagination: &Pagination) -> String {
    let mut line = format!(
        "Page {} of {}",
        pagination.current_page, pagination.page_count
    );
    if pagination.previous.is_some() {
        line.push_str(" | p: prev");
    }
    line.push_str(" |");
    for page in &pagination.pages {
        if page.active {
            let _ = write!(line, " [{}]", page.number);
        } else {
            let _ = write!(line, " {}", page.number);
        }
    }
    if pagination.next.is_some() {
        line.push_str(" | n: next");
    }
    line
}

pub fn render_detail(render: &DetailRender) -> String {
    match render {
        DetailRender::Error(message) => format!("! {message}\n"),
        DetailRender::Loading(message) => format!("{message}...\n"),
        DetailRender::Ready(view) => render_card(view),
    }
}

pub fn render_modal(modal: &ModalView) -> String {
    let mut out = format!("== {} ==\n", modal.title);
    match &modal.body {
        ModalBody::Detail(view) => out.push_str(&render_card(view)),
        ModalBody::Unavailable(message) => {
            let _ = writeln!(out, "{message}");
        }
    }
    out.push_str("(c: close)\n");
    out
}

/// The full alert card. Also the content of exported files.
pub fn render_card(view: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.headline);
    if let Some(message_type) = &view.message_type {
        let _ = writeln!(out, "{}", label(message_type));
    }
    let _ = writeln!(
        out,
        "Urgency: {} | Severity: {} | Certainty: {}",
        label(&view.urgency),
        label(&view.severity),
        label(&view.certainty)
    );
    if !view.response_types.is_empty() {
        let _ = writeln!(out, "Response: {}", view.response_types.join(", "));
    }
    match &view.sender {
        Sender::Link { name, href } => {
            let _ = writeln!(out, "From: {name} <{href}>");
        }
        Sender::Plain(name) => {
            let _ = writeln!(out, "From: {name}");
        }
    }
    if let Some(effective) = &view.effective {
        let _ = writeln!(out, "Effective: {effective}");
    }
    let _ = writeln!(out, "Expires: {}", view.expires);
    if !view.areas.is_empty() {
        let _ = writeln!(out, "Areas: {}", view.areas.join("; "));
    }

    if !view.description.is_empty() {
        out.push('\n');
        for line in &view.description {
            let _ = writeln!(out, "{line}");
        }
    }

    if let Some(instruction) = &view.instruction {
        out.push_str("\nInstruction:\n");
        for line in instruction {
            let _ = writeln!(out, "{line}");
        }
    }

    if !view.resources.is_empty() {
        out.push_str("\nResources:\n");
        for resource in &view.resources {
            if resource.description.is_empty() {
                let _ = writeln!(out, "  - {} <{}>", resource.label, resource.href);
            } else {
                let _ = writeln!(
                    out,
                    "  - {}: {} <{}>",
                    resource.label, resource.description, resource.href
                );
            }
        }
    }
    out
}

fn label(label: &Label) -> String {
    match label.colour {
        Some(colour) => format!("{} ({})", label.text, colour.name()),
        None => label.text.clone(),
    }
}
