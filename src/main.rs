use anyhow::Result;
use clap::Parser;

use pkg_release::command::SystemRunner;
use pkg_release::config;
use pkg_release::git;
use pkg_release::ui;
use pkg_release::workflow::{self, RunFlags};

#[derive(clap::Parser)]
#[command(
    name = "pkg-release",
    about = "Bump, tag, and push a package release when relevant changes exist"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Write and commit the manifest version bump")]
    commit: bool,

    #[arg(long, help = "Create the release tag")]
    tag: bool,

    #[arg(long, help = "Push branch head and tag to the remote")]
    push: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("pkg-release {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let cwd = std::env::current_dir()?;

    // All release commands run from the repository root.
    let bootstrap = SystemRunner::new(cwd);
    let root = match git::discover_root(&bootstrap) {
        Ok(root) => root,
        Err(e) => {
            ui::display_error(&format!("Not in a git repository: {}", e));
            std::process::exit(e.exit_code());
        }
    };
    let runner = SystemRunner::new(&root);

    let flags = RunFlags {
        commit: args.commit,
        tag: args.tag,
        push: args.push,
        dry_run: args.dry_run,
    };

    match workflow::run_release(&root, &config, &flags, &runner) {
        Ok(outcome) => {
            if outcome.release {
                ui::display_success(&format!("Release decided: version {}", outcome.version));
            }
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
