mod cli;

use clap::Parser;
use memo::config::Config;
use memo::creator::{Creator, Mode};
use memo::env::SystemEnv;
use memo::list::{ListFilter, list_memos};

fn main() {
    env_logger::init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let env = SystemEnv;
    match cli.command {
        cli::Command::New(args) => handle_new(&env, args),
        cli::Command::List(args) => handle_list(&env, args),
    }
}

fn handle_new(env: &SystemEnv, args: cli::NewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mode = Mode::from_flags(args.directory, &args.ext)?;
    let config = Config::from_env(env)?;
    let creator = Creator::new(config);

    if let Some(warning) = creator.check_gitignore(env) {
        eprintln!("{warning}");
        eprintln!();
    }

    let name = args.name.as_deref().unwrap_or_default();
    let path = match &mode {
        Mode::File { ext } => creator.create(name, ext)?,
        Mode::Directory => creator.create_directory(name)?,
    };

    match mode {
        Mode::File { .. } => eprintln!("✅ Memo created at: {}", path.display()),
        Mode::Directory => eprintln!("✅ Directory created at: {}", path.display()),
    }
    println!("{}", path.display());

    Ok(())
}

fn handle_list(env: &SystemEnv, args: cli::ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env(env)?;
    let filter = ListFilter {
        ext: args.ext,
        limit: args.limit,
    };
    let entries = list_memos(&config.base_dir, &filter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.path.display());
    }
    Ok(())
}
