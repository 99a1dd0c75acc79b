use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log::LevelFilter;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use subnet_calculator::cli::USAGE;
use subnet_calculator::config::Config;

fn init_logging(log_config: &Path) -> Result<(), Box<dyn Error>> {
    if log_config.exists() {
        log4rs::init_file(log_config, Default::default())?;
    } else {
        // stdout carries the results, keep logs on stderr
        let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
        let config = LogConfig::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config.log_config) {
        eprintln!("Error initializing log4rs: {e}");
    }
    log::info!("#Start main()");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match subnet_calculator::run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
