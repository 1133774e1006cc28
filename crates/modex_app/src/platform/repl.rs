use modex_core::{AppState, Msg};
use modex_logging::modex_info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::app::App;
use super::config::AppConfig;
use super::ui::commands::{parse_command, ReplCommand, HELP_TEXT};
use super::ui::render::render;

const PROMPT: &str = "modex> ";
const PASTE_PROMPT: &str = "...... ";

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let mut rl = DefaultEditor::new()?;
    modex_info!("REPL started against {}", config.backend_url);

    println!("modex {} | backend {}", env!("CARGO_PKG_VERSION"), config.backend_url);
    println!("Type 'help' for commands.\n");
    if app.take_needs_render() {
        print!("{}", render(&app.view()));
    }

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                eprintln!("(Ctrl+C) Type 'quit' to leave.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        if let Some(problem) = check_row(&command, app.state()) {
            eprintln!("{problem}");
            continue;
        }

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP_TEXT}"),
            ReplCommand::List => print!("{}", render(&app.view())),
            ReplCommand::Paste { index } => {
                let raw = read_paste(&mut rl)?;
                app.dispatch(Msg::LinesPasted { index, raw });
            }
            ReplCommand::Copy | ReplCommand::Export if app.view().modules.is_none() => {
                eprintln!("No modules yet. Run 'submit' first.");
            }
            other => {
                for msg in messages_for(other, app.state()) {
                    app.dispatch(msg);
                }
            }
        }

        if app.view().loading && app.take_needs_render() {
            print!("{}", render(&app.view()));
        }
        app.settle();
        if app.take_needs_render() {
            let view = app.view();
            print!("{}", render(&view));
            if let Some(finished) = app.last_finished() {
                if view.modules.is_some() || view.error.is_some() {
                    println!("(finished at {})", finished.format("%H:%M:%S"));
                }
            }
        }
    }

    Ok(())
}

/// Maps a parsed command onto the messages it stands for.
fn messages_for(command: ReplCommand, state: &AppState) -> Vec<Msg> {
    match command {
        ReplCommand::Set { index, text } => vec![Msg::EntryEdited { index, text }],
        ReplCommand::Add(None) => vec![Msg::EntryAdded],
        ReplCommand::Add(Some(text)) => vec![
            Msg::EntryAdded,
            Msg::EntryEdited {
                index: state.collector().len(),
                text,
            },
        ],
        ReplCommand::Remove { index } => vec![Msg::EntryRemoved { index }],
        ReplCommand::Submit => vec![Msg::SubmitClicked],
        ReplCommand::Copy => vec![Msg::CopyJsonClicked],
        ReplCommand::Export => vec![Msg::ExportClicked],
        ReplCommand::Ping => vec![Msg::HealthCheckClicked],
        ReplCommand::List | ReplCommand::Paste { .. } | ReplCommand::Help | ReplCommand::Quit => {
            Vec::new()
        }
    }
}

fn check_row(command: &ReplCommand, state: &AppState) -> Option<String> {
    let index = match command {
        ReplCommand::Set { index, .. }
        | ReplCommand::Remove { index }
        | ReplCommand::Paste { index } => *index,
        _ => return None,
    };
    let rows = state.collector().len();
    if index >= rows {
        return Some(format!("No row {} (there are {rows})", index + 1));
    }
    if matches!(command, ReplCommand::Remove { .. }) && !state.collector().can_remove() {
        return Some("At least one row must remain.".to_string());
    }
    None
}

fn read_paste(rl: &mut DefaultEditor) -> anyhow::Result<String> {
    let mut lines = Vec::new();
    loop {
        match rl.readline(PASTE_PROMPT) {
            Ok(line) if line.trim().is_empty() => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(lines.join("\n"))
}
