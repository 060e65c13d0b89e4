use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

use clap::{Parser, Subcommand};
use eyre::{eyre, Result};
use flatser::Session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the workspace tests
    Test {
        /// Use release mode for builds.
        #[arg(short, long, default_value = "false")]
        release: bool,
    },

    /// Runs clippy over the workspace, denying warnings
    Lint,

    /// Prints an encoded buffer as hex
    Dump {
        /// File holding the encoded bytes
        path: PathBuf,

        /// Bytes per line
        #[arg(short, long, default_value = "16")]
        width: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test { release } => {
            println!("Running workspace tests...");
            cargo(&["test", "--workspace"], release)?;
        }
        Commands::Lint => {
            println!("Running clippy...");
            cargo(
                &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
                false,
            )?;
        }
        Commands::Dump { path, width } => {
            dump(&path, width)?;
        }
    }
    Ok(())
}

fn dump(path: &Path, width: usize) -> Result<()> {
    if width == 0 {
        return Err(eyre!("Line width must be at least 1"));
    }
    let mut session = Session::with_buffer(fs::read(path)?);
    println!("{}: {} bytes", path.display(), session.len());

    for (i, line) in session.buffer().chunks(width).enumerate() {
        let hex: Vec<String> = line.iter().map(|b| format!("{b:02x}")).collect();
        println!("{:08x}  {}", i * width, hex.join(" "));
    }

    let mut prefix = 0u32;
    if session.decode(&mut prefix).is_ok() {
        let remaining = session.remaining();
        println!("Leading length prefix: {prefix} ({remaining} bytes follow)");
    }

    Ok(())
}

fn cargo(args: &[&str], release: bool) -> Result<()> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());

    let mut command = Command::new(cargo);
    command.current_dir(project_root()).args(args);
    if release {
        command.arg("--release");
    }
    let status = command
        .status()
        .map_err(|e| eyre!("Error running cargo: {}", e))?;
    if !status.success() {
        return Err(eyre!("cargo {} failed with {status}", args.join(" ")));
    }

    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
