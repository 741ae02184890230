use clap::Parser;
use svnsync::{cli::args::CliArgs, config::SvnsyncConfig, Svnsync};

/// Baked in at compile time and passed explicitly into `run`, so there is
/// no mutable package-level version state.
const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run(BUILD_VERSION) {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run(build_version: &str) -> anyhow::Result<()> {
    log::info!("svnsync {build_version}");

    let args = CliArgs::parse();
    let config = SvnsyncConfig::load()?;

    let mut builder = Svnsync::builder()
        .repository_url(args.url)
        .branch(args.branch)
        .revision(args.revision)
        .workspace(args.workspace);

    if let Some(ssh_key) = args.ssh_key {
        builder = builder.ssh_key(ssh_key);
    }
    if let Some(ssh_dir) = config.ssh_dir {
        builder = builder.ssh_dir(ssh_dir);
    }
    if let Some(svn_program) = config.svn_program {
        builder = builder.svn_program(svn_program);
    }

    builder.try_build()?.sync()
}
