use std::time::Duration;

use chrono::{DateTime, Local};
use modex_core::{update, AppState, AppViewModel, ExtractionPhase, Msg};
use modex_logging::{modex_debug, modex_error};

use super::config::AppConfig;
use super::effects::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Owns the state and feeds it messages; the single place `update` is called.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    needs_render: bool,
    last_finished: Option<DateTime<Local>>,
}

impl App {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState::new(),
            runner: EffectRunner::new(config)?,
            needs_render: true,
            last_finished: None,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn last_finished(&self) -> Option<DateTime<Local>> {
        self.last_finished
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let finishing = matches!(msg, Msg::ExtractionFinished(_));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_render = true;
        }
        if finishing && !matches!(state.phase(), ExtractionPhase::Loading) {
            self.last_finished = Some(Local::now());
        }
        self.state = state;
        self.runner.run(effects);
    }

    /// Blocks until every outstanding engine call has been applied.
    pub fn settle(&mut self) {
        while self.runner.has_pending() {
            match self.runner.next_msg(POLL_INTERVAL) {
                Ok(Some(msg)) => {
                    modex_debug!("Engine result received");
                    self.dispatch(msg);
                }
                Ok(None) => {}
                Err(err) => {
                    modex_error!("{}", err);
                    // Nothing will answer the in-flight request any more.
                    if self.state.inputs_locked() {
                        self.dispatch(Msg::ExtractionFinished(Err(err.to_string())));
                    }
                }
            }
        }
    }

    /// Returns whether the view changed since the last call.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }
}
