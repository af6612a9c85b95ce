//! Global state container, action dispatch, and background request results.

use std::path::PathBuf;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::actions::Action;
use crate::backend::{BackendClient, HealthResponse};
use crate::config::{EndpointConfig, KeyValueStore};
use crate::dedupe::{self, FileUpload};
use crate::error::{ClientError, ClientResult};
use crate::state::{ApiStatus, AppState, Field, Notice};

/// Completed background request. Applied in arrival order, so the last one to finish wins.
#[derive(Debug)]
pub enum TaskResult {
    Health(ClientResult<HealthResponse>),
    Dedupe(ClientResult<PathBuf>),
}

pub struct App<S> {
    pub state: AppState,
    client: BackendClient,
    config: EndpointConfig<S>,
    /// API field value when it last gained focus or was saved.
    api_base_committed: String,
    runtime: Handle,
    download_dir: PathBuf,
    tx: UnboundedSender<TaskResult>,
    rx: UnboundedReceiver<TaskResult>,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(client: BackendClient, config: EndpointConfig<S>, runtime: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            state: AppState::default(),
            client,
            config,
            api_base_committed: String::new(),
            runtime,
            download_dir: dedupe::download_dir(),
            tx,
            rx,
            should_quit: false,
            tick: 0,
        }
    }

    #[cfg(test)]
    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = dir;
        self
    }

    /// Seeds the API field from saved config and runs a first health check.
    pub fn bootstrap(&mut self) {
        self.state.api_base.set(self.config.initial_input());
        self.api_base_committed = self.state.api_base.value.clone();
        self.check_api();
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.state.focus == Field::ApiBase && self.api_base_edited() {
                    self.config.persist(&self.state.api_base.value);
                }
                self.should_quit = true;
            }

            Action::Char(c) => {
                if let Some(input) = self.state.focused_input_mut() {
                    input.insert(c);
                }
            }
            Action::Backspace => {
                if let Some(input) = self.state.focused_input_mut() {
                    input.backspace();
                }
            }
            Action::ClearField => {
                if let Some(input) = self.state.focused_input_mut() {
                    input.clear();
                }
            }

            Action::FocusNext => self.move_focus(true),
            Action::FocusPrev => self.move_focus(false),
            Action::CycleNext => self.state.cycle_focused(true),
            Action::CyclePrev => self.state.cycle_focused(false),

            Action::CheckApi => self.save_and_check(),
            Action::Submit => {
                if self.state.focus == Field::ApiBase {
                    self.save_and_check();
                } else {
                    self.run_dedupe();
                }
            }
        }
    }

    /// Leaving an edited API field saves and re-checks it.
    fn move_focus(&mut self, forward: bool) {
        let was_api = self.state.focus == Field::ApiBase;
        if forward {
            self.state.focus_next();
        } else {
            self.state.focus_prev();
        }
        let is_api = self.state.focus == Field::ApiBase;
        if was_api && !is_api && self.api_base_edited() {
            self.save_and_check();
        } else if is_api && !was_api {
            self.api_base_committed = self.state.api_base.value.clone();
        }
    }

    fn api_base_edited(&self) -> bool {
        self.state.api_base.value != self.api_base_committed
    }

    fn api_base(&self) -> String {
        self.config.resolve(Some(&self.state.api_base.value))
    }

    /// Persists the field (normalized, written back) and re-checks.
    fn save_and_check(&mut self) {
        let normalized = self.config.persist(&self.state.api_base.value);
        self.api_base_committed = normalized.clone();
        self.state.api_base.set(normalized);
        self.check_api();
    }

    fn check_api(&mut self) {
        let base = self.api_base();
        self.state.api_status = ApiStatus::checking();
        self.state.in_flight += 1;
        info!("checking api at {}", base);

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.health_check(&base).await;
            let _ = tx.send(TaskResult::Health(result));
        });
    }

    fn run_dedupe(&mut self) {
        let base = self.api_base();
        let request = FileUpload::load(&self.state.file_path.value)
            .and_then(|file| dedupe::validate(&self.state.dedupe_form(), file));
        let request = match request {
            Ok(r) => r,
            Err(e) => {
                info!("dedupe rejected: {}", e);
                self.state.notice = Notice::from_error(&ClientError::from(e));
                return;
            }
        };

        self.state.notice = Notice::running();
        self.state.in_flight += 1;

        let client = self.client.clone();
        let dir = self.download_dir.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = async {
                let bytes = client.dedupe(&base, request).await?;
                let path = dedupe::save_result(&dir, &bytes).await?;
                info!("dedupe result saved to {} ({} bytes)", path.display(), bytes.len());
                Ok::<_, ClientError>(path)
            }
            .await;
            let _ = tx.send(TaskResult::Dedupe(result));
        });
    }

    /// Drains finished requests into the display state.
    pub fn poll_results(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.apply(result);
        }
    }

    fn apply(&mut self, result: TaskResult) {
        self.state.in_flight = self.state.in_flight.saturating_sub(1);
        match result {
            TaskResult::Health(r) => {
                self.state.api_status = ApiStatus::from_result(&r);
            }
            TaskResult::Dedupe(Ok(path)) => {
                self.state.notice = Notice::saved(&path);
            }
            TaskResult::Dedupe(Err(e)) => {
                error!("dedupe failed (status {:?}): {}", e.status(), e);
                self.state.notice = Notice::from_error(&e);
            }
        }
    }
}
