// src/notify.rs
// Importance notification side effect. Failures here are logged and
// swallowed; they never affect classification results.

use std::path::Path;
use std::sync::Mutex;

use crate::store::ClassifiedItem;

pub trait Notifier: Send + Sync {
    fn notify(&self, item: &ClassifiedItem);
}

/// Console notifier: structured "panel" log line plus a terminal bell when
/// sound is enabled. A configured sound file is accepted for compatibility
/// but playback degrades to the bell.
pub struct ConsoleNotifier {
    sound_enable: bool,
}

impl ConsoleNotifier {
    pub fn new(sound_enable: bool, sound_file: &str) -> Self {
        if sound_enable && !sound_file.is_empty() && !Path::new(sound_file).exists() {
            tracing::warn!(file = %sound_file, "sound file not found; using terminal bell");
        }
        Self { sound_enable }
    }

    fn ring_bell(&self) {
        if !self.sound_enable {
            return;
        }
        use std::io::Write;
        let mut out = std::io::stdout();
        if out.write_all(b"\x07").and_then(|_| out.flush()).is_err() {
            tracing::warn!("sound notification failed");
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, item: &ClassifiedItem) {
        self.ring_bell();
        tracing::info!(
            target: "important",
            title = %item.title,
            link = %item.link,
            category = %item.category,
            score = item.score,
            time = %item.time,
            "important news"
        );
    }
}

/// Test double: records notified titles in order.
#[derive(Default)]
pub struct RecordingNotifier {
    titles: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, item: &ClassifiedItem) {
        self.titles
            .lock()
            .expect("notifier mutex poisoned")
            .push(item.title.clone());
    }
}
