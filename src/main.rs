
use std::{fmt::Display, process::exit};

use clap::{CommandFactory, Parser};
use config::MergeConfig;
use console::style;
use error::MergeError;
use reconcile::{ReconcileOutcome, reconcile};

mod children;
mod config;
mod error;
mod manifest;
mod merge;
mod reconcile;

fn main() {
    dotenv::dotenv().ok();

    let opts = match CliOpts::try_parse() {
        Ok(opts) => opts,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            print_usage();
            exit(-1)
        }
    };

    log(format!("pkgmerge v{}", env!("CARGO_PKG_VERSION")));

    match run(&opts) {
        Ok(res) => {
            log(format!("Merging into {} completed: {res}", res.manifest_path.display()));
            exit(0)
        },
        Err(e) => {
            error(format!("Merging failed: {e}"));
            if e.wants_usage() {
                print_usage();
            }
            exit(-1)
        }
    }
}

fn run(opts: &CliOpts) -> Result<ReconcileOutcome, MergeError> {
    let config = MergeConfig::try_from(opts)?;

    log(format!("Merging {} dependencies from {} into {}",
        config.manifest_type, config.child_root.display(), config.parent_manifest().display()));

    Ok(reconcile(&config)?)
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about,
    after_help = "Every option can also be set through its PKGMERGE_* environment variable, including from a .env file \
in the working directory. When any of those are set, running without flags merges instead of printing this help.")]
pub(crate) struct CliOpts {
    #[arg(short, long, env = "PKGMERGE_CHILD",
        help = "The root directory where all child packages exist, one subdirectory per package.")]
    child: Option<String>,

    #[arg(short, long, env = "PKGMERGE_PARENT",
        help = "The directory of the parent package into which the child dependencies are merged.")]
    parent: Option<String>,

    #[arg(short = 't', long = "type", env = "PKGMERGE_TYPE", value_name = "bower|npm",
        help = "The manifest family: 'bower' merges bower.json files, 'npm' merges package.json files.")]
    manifest_type: Option<String>,

    #[arg(short, long, env = "PKGMERGE_VERBOSE", default_value_t = false,
        help = "Verbose logging. Logs every child package as it is processed.")]
    verbose: bool,
}

fn print_usage() {
    let _ = CliOpts::command().print_help();
}

fn now() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn log<M: Display>(msg: M) {
    println!("{} {msg}", now());
}

fn warn<M: Display>(msg: M) {
    eprintln!("{} {}", now(), style(msg).yellow());
}

fn error<M: Display>(msg: M) {
    eprintln!("{} {}", now(), style(msg).red());
}
