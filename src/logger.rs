use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger { level })).map(|()| log::set_max_level(level))
}

/**
 * Writes this crate's records to stderr, keeping stdout for command output.
 */
pub struct Logger {
    level: LevelFilter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }

        let chunks: Vec<&str> = metadata.target().split("::").collect();
        matches!(chunks[..], ["vcs_carts", ..])
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() < Level::Info {
                eprint!("{} - ", record.level());
            }

            eprintln!("{}", record.args());
        }
    }

    fn flush(&self) {}
}
