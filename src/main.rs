use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_changelog::config::{self, ConfigOverrides};
use git_changelog::git::Git2Repository;
use git_changelog::{ui, ChangelogGenerator};

#[derive(clap::Parser)]
#[command(
    name = "git-changelog",
    version,
    about = "Build a changelog from git tags and conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path to the repository")]
    path: String,

    #[arg(long, help = "Changelog title")]
    title: Option<String>,

    #[arg(long, help = "Changelog description")]
    description: Option<String>,

    #[arg(short, long, help = "Remote used to derive issue and compare links")]
    remote: Option<String>,

    #[arg(long, help = "Use this version as title of the untagged tip")]
    latest_version: Option<String>,

    #[arg(short, long, help = "Include untagged tip commits as 'Unreleased'")]
    unreleased: bool,

    #[arg(long, help = "Use GitLab link layout")]
    gitlab: bool,

    #[arg(long, help = "Issue link template with an {id} placeholder")]
    issue_url: Option<String>,

    #[arg(long, help = "Regex matching issue references")]
    issue_pattern: Option<String>,

    #[arg(long, help = "Compare link template with {previous} and {current}")]
    diff_url: Option<String>,

    #[arg(long, help = "Prefix release tags start with")]
    tag_prefix: Option<String>,

    #[arg(long, help = "semver, calendar, or a regular expression")]
    tag_pattern: Option<String>,

    #[arg(long, help = "Oldest commit to include")]
    starting_commit: Option<String>,

    #[arg(long, help = "Newest commit to include")]
    stopping_commit: Option<String>,

    #[arg(short, long, help = "Log debug output")]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            title: self.title.clone(),
            description: self.description.clone(),
            remote: self.remote.clone(),
            gitlab: self.gitlab.then_some(true),
            issue_pattern: self.issue_pattern.clone(),
            issue_url: self.issue_url.clone(),
            diff_url: self.diff_url.clone(),
            starting_commit: self.starting_commit.clone(),
            stopping_commit: self.stopping_commit.clone(),
            tag_prefix: self.tag_prefix.clone(),
            tag_pattern: self.tag_pattern.clone(),
            latest_version: self.latest_version.clone(),
            unreleased: self.unreleased.then_some(true),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg.merge(args.overrides()),
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = Git2Repository::open(&args.path)
        .with_context(|| format!("Cannot open git repository at '{}'", args.path))?;

    let report = ChangelogGenerator::new(config)
        .generate(repo)
        .context("Changelog generation failed")?;

    for warning in &report.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_changelog(&report.changelog);

    Ok(())
}
