//! Panic hook: one line on stderr, the backtrace appended to `crash.log`

use std::backtrace::Backtrace;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, PanicHookInfo};

use chrono::Utc;

pub const CRASH_LOG: &str = "crash.log";

struct CrashReport {
    at: String,
    what: String,
    site: String,
    backtrace: Backtrace,
}

impl CrashReport {
    fn capture(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let what = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        let site = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "?".to_string());

        Self {
            at: Utc::now().to_rfc3339(),
            what,
            site,
            backtrace: Backtrace::force_capture(),
        }
    }

    fn append_to(&self, path: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", self)
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- tcarchive crash at {} ---", self.at)?;
        writeln!(f, "{} ({})", self.what, self.site)?;
        writeln!(f, "{}", self.backtrace)
    }
}

pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let report = CrashReport::capture(info);
        eprintln!("tcarchive panicked at {}: {}", report.site, report.what);
        match report.append_to(CRASH_LOG) {
            Ok(()) => eprintln!("backtrace appended to {}", CRASH_LOG),
            Err(e) => eprintln!("could not write {}: {}", CRASH_LOG, e),
        }
    }));
}
