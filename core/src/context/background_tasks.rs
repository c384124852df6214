use tokio::task::JoinHandle;

/// Long-running tasks owned by a front-end session
#[derive(Default)]
pub struct BackgroundTasks {
    pub audio_service: Option<JoinHandle<()>>,
    pub audio_companion: Option<JoinHandle<()>>,
    pub event_printer: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub async fn abort_all(&mut self) {
        if let Some(handle) = self.event_printer.take() {
            handle.abort();
        }
        if let Some(handle) = self.audio_companion.take() {
            handle.abort();
        }
        if let Some(handle) = self.audio_service.take() {
            handle.abort();
        }
    }
}
