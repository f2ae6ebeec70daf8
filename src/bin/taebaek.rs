use taebaek::cli::{self, USAGE};
use taebaek::compiler::Compiler;
use taebaek::config::Config;
use taebaek::logging::init_tracing;

use std::process;

use tracing::{error, warn};

fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("taebaek: {}", msg);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    init_tracing(args.verbosity);

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };
    args.apply(&mut config);

    let compiler = Compiler::new(&args.source, &args.destination, config);

    match compiler.compile() {
        Ok(report) => {
            if !report.diagnostics.is_empty() {
                warn!("{}", report.summary());
            }
            if report.fatal.is_some() {
                process::exit(1);
            }
        }
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
