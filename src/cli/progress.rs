//! Terminal progress bar for registry lookups.
//!
//! indicatif draws to stderr and hides itself when stderr is not a TTY, so
//! piped output stays clean.
use indicatif::{ProgressBar, ProgressStyle};

use casquery::{LookupEvent, LookupObserver};

pub struct LookupProgress {
    bar: ProgressBar,
}

impl LookupProgress {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{msg} {bar:40.cyan/blue} {pos}/{len} {prefix}")
        {
            bar.set_style(style.progress_chars("━╸ "));
        }
        bar.set_message(message.to_string());
        Self { bar }
    }
}

impl LookupObserver for LookupProgress {
    fn on_lookup(&self, event: &LookupEvent<'_>) {
        self.bar.set_length(event.total as u64);
        self.bar.set_prefix(event.key.to_string());
        self.bar.set_position(event.index as u64 + 1);
    }

    fn on_complete(&self, _total: usize) {
        self.bar.finish_and_clear();
    }
}
