use tokio::sync::watch;

/// Change broadcast shared by every store.
///
/// Each mutation bumps a revision counter; subscribers await
/// `Receiver::changed` and then re-read whatever state they display.
#[derive(Debug)]
pub struct Notifier {
    revision: watch::Sender<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self { revision }
    }

    pub fn notify(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
