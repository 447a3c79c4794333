use std::process::ExitCode;

use clap::Parser as _;

use trifade::config::{Args, Config};
use trifade::{app, report};

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!(
            "{level:<5} {target}:{line:<4} > {text}",
            level = record.level(),
            target = record.target(),
            line = record
                .line()
                .map_or_else(|| "?".to_string(), |line| line.to_string()),
            text = record.args(),
        );
    }

    fn flush(&self) {}
}

impl Logger {
    fn init(level: log::LevelFilter) {
        if log::set_logger(&Logger).is_ok() {
            log::set_max_level(level);
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    Logger::init(args.log_level());

    let result = Config::try_from(args).and_then(|config| {
        log::debug!("{config:?}");
        app::run(&config)
    });

    match result {
        Ok(summary) => {
            log::info!(
                "rendered {} frames over {} fade cycles{}",
                summary.frames,
                summary.cycles,
                if summary.interrupted { " (interrupted)" } else { "" },
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:?}");
            if let Some(info_log) = report::info_log(&err) {
                eprintln!("{}", info_log.trim_end());
            }
            println!("{}", report::failure_line(&err));
            ExitCode::FAILURE
        }
    }
}
