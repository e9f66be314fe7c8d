use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use expo_bump::cli::{run_release, Outcome, RunOptions};
use expo_bump::config::{self, Settings};
use expo_bump::domain::ReleaseType;
use expo_bump::git::GitRepository;
use expo_bump::publish::CommandPublisher;
use expo_bump::ui::{self, TerminalPrompt};
use expo_bump::ExpoBumpError;

#[derive(clap::Parser)]
#[command(
    name = "expo-bump",
    version,
    about = "Bump the version of an Expo app.json, tag it and publish it"
)]
struct Args {
    #[arg(
        default_value = "patch",
        help = "major | minor | patch | premajor | preminor | prepatch | prerelease"
    )]
    release_type: String,

    #[arg(long, help = "Input filename [default: app.json, or exp.json with --exp]")]
    file: Option<PathBuf>,

    #[arg(long, help = "Input is exp.json")]
    exp: bool,

    #[arg(long, help = "Increment Android's version code")]
    android: bool,

    #[arg(long, help = "Update iOS's buildNumber equal to new version")]
    ios: bool,

    #[arg(long, help = "Publish an Expo update without asking")]
    publish: bool,

    #[arg(long, value_name = "FILE", help = "Copy bumped file to new name")]
    cpy: Option<PathBuf>,

    #[arg(long, value_name = "ID", help = "Pre-release identifier, e.g. beta")]
    preid: Option<String>,

    #[arg(short, long, help = "Custom settings file path")]
    config: Option<String>,

    #[arg(short, long, help = "Print debug logs")]
    verbose: bool,
}

impl Args {
    /// Release type errors are usage errors, not clap argument errors.
    fn run_options(&self) -> expo_bump::Result<RunOptions> {
        Ok(RunOptions {
            release_type: self.release_type.parse::<ReleaseType>()?,
            file: self.file.clone(),
            exp: self.exp,
            android: self.android,
            ios: self.ios,
            publish: self.publish,
            cpy: self.cpy.clone(),
            preid: self.preid.clone(),
        })
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = match args.run_options() {
        Ok(options) => options,
        Err(e) => exit_with_usage(&e.to_string()),
    };

    // Load settings
    let settings = match config::load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            ui::display_error(&format!("Error loading settings: {}", e));
            std::process::exit(1);
        }
    };
    log::debug!("settings: {:?}", settings);

    match release(&options, &settings) {
        Ok(Outcome::Failed { .. }) => std::process::exit(1),
        Ok(_) => Ok(()),
        Err(ExpoBumpError::Usage(message)) => exit_with_usage(&message),
        Err(e) => Err(e.into()),
    }
}

fn exit_with_usage(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn release(options: &RunOptions, settings: &Settings) -> expo_bump::Result<Outcome> {
    let repo = GitRepository::discover(".")?;
    let publisher = CommandPublisher::from_command(&settings.publish_command)?;
    run_release(
        &repo,
        &publisher,
        &TerminalPrompt::new(),
        settings,
        options,
    )
}
