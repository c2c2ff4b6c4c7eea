use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub change_watcher: Option<JoinHandle<()>>,
    pub directory_watcher: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Swap in a new change watcher task, aborting the previous one.
    pub fn replace_change_watcher(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.change_watcher.replace(handle) {
            previous.abort();
        }
    }

    pub fn abort_all(&mut self) {
        if let Some(handle) = self.change_watcher.take() {
            handle.abort();
        }
        if let Some(handle) = self.directory_watcher.take() {
            handle.abort();
        }
    }
}
