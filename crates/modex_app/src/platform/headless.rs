use std::process::ExitCode;

use modex_core::{BackendStatus, Msg};

use super::app::App;
use super::config::AppConfig;
use super::ui::render::{render, render_backend};

/// Fills one row per URL, submits once and prints the outcome.
///
/// Exits with failure on row errors or an extraction failure.
pub fn run_extract(
    config: &AppConfig,
    urls: &[String],
    json: bool,
    export: bool,
) -> anyhow::Result<ExitCode> {
    let mut app = App::new(config)?;
    for (index, url) in urls.iter().enumerate() {
        if index > 0 {
            app.dispatch(Msg::EntryAdded);
        }
        app.dispatch(Msg::EntryEdited {
            index,
            text: url.clone(),
        });
    }
    app.dispatch(Msg::SubmitClicked);
    app.settle();

    let view = app.view();
    let succeeded = view.modules.is_some();
    if succeeded && json {
        app.dispatch(Msg::CopyJsonClicked);
    } else {
        print!("{}", render(&view));
    }
    if succeeded && export {
        app.dispatch(Msg::ExportClicked);
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn run_ping(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let mut app = App::new(config)?;
    app.dispatch(Msg::HealthCheckClicked);
    app.settle();

    match app.view().backend {
        Some(status) => {
            println!("{}", render_backend(&status));
            Ok(if matches!(status, BackendStatus::Online { .. }) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => Ok(ExitCode::FAILURE),
    }
}
