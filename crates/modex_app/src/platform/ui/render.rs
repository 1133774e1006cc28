use std::fmt::Write;

use modex_core::{AppViewModel, BackendStatus, ErrorView, Module, RowView};

pub const LOADING_TEXT: &str = "Extracting modules from documentation...";
pub const LOADING_HINT: &str = "Processing multiple URLs, this may take a moment...";
const MERGE_NOTE: &str =
    "Note: Modules have been extracted and merged from all provided documentation URLs.";

/// Renders the whole screen: rows, then status, then results.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    render_rows(&mut out, view);

    if view.loading {
        out.push('\n');
        out.push_str(LOADING_TEXT);
        out.push('\n');
        out.push_str(LOADING_HINT);
        out.push('\n');
    }
    if let Some(error) = &view.error {
        out.push('\n');
        out.push_str(&render_error(error));
    }
    if let Some(modules) = &view.modules {
        out.push('\n');
        out.push_str(&render_modules(modules));
    }
    if let Some(backend) = &view.backend {
        out.push('\n');
        out.push_str(&render_backend(backend));
        out.push('\n');
    }
    out
}

fn render_rows(out: &mut String, view: &AppViewModel) {
    out.push_str("Documentation URLs\n");
    for row in &view.rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    let _ = writeln!(out, "[{}]", view.submit_label);
}

fn format_row(row: &RowView) -> String {
    let text = if row.text.is_empty() {
        "(empty)"
    } else {
        row.text.as_str()
    };
    match &row.error {
        Some(error) => format!("  #{} {text}  ! {error}", row.index + 1),
        None => format!("  #{} {text}", row.index + 1),
    }
}

pub fn render_error(error: &ErrorView) -> String {
    let mut out = format!("Error: {}\n", error.message);
    if error.quota_exhausted {
        out.push_str("Solution: Your API quota has been exceeded.\n");
        out.push_str("  - Check your usage at https://platform.openai.com/usage\n");
        out.push_str(
            "  - Add a payment method at https://platform.openai.com/account/billing\n",
        );
        out.push_str("  - Or configure an alternative API provider for the backend\n");
    }
    out
}

pub fn render_modules(modules: &[Module]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Extracted Modules ({})", module_count_label(modules.len()));
    out.push_str(MERGE_NOTE);
    out.push('\n');

    for (number, module) in modules.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", number + 1, module.module);
        if let Some(description) = module.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "   {description}");
        }
        if module.submodules.is_empty() {
            continue;
        }
        out.push_str("   Submodules:\n");
        for (name, description) in &module.submodules {
            match description.as_deref().filter(|d| !d.is_empty()) {
                Some(description) => {
                    let _ = writeln!(out, "     - {name} — {description}");
                }
                None => {
                    let _ = writeln!(out, "     - {name}");
                }
            }
        }
    }
    out
}

pub fn module_count_label(count: usize) -> String {
    if count == 1 {
        "1 module found".to_string()
    } else {
        format!("{count} modules found")
    }
}

pub fn render_backend(status: &BackendStatus) -> String {
    match status {
        BackendStatus::Online { status, message } if message.is_empty() => {
            format!("Backend is {status}")
        }
        BackendStatus::Online { status, message } => format!("Backend is {status}: {message}"),
        BackendStatus::HttpError(code) => format!("Backend returned status {code}"),
        BackendStatus::Unreachable(reason) => format!("Cannot connect to backend: {reason}"),
    }
}
