use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};

use proofcast_kernel::digest::{prove, verify, ContentDigest};

#[derive(Parser, Debug)]
#[command(author, version, about = "Offline digest tool for proofcast payloads", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the digest of a literal payload or of a file's bytes
    Prove {
        /// Payload to digest
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        data: Option<String>,

        /// Digest the raw bytes of this file instead
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
    /// Compare two digests exactly; exits non-zero on mismatch
    Verify {
        provided: String,
        expected: String,
    },
}

fn digest_of(data: Option<String>, file: Option<PathBuf>) -> Result<ContentDigest> {
    match (data, file) {
        (_, Some(path)) => {
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(prove(bytes))
        }
        (Some(data), None) => Ok(prove(data)),
        (None, None) => anyhow::bail!("Nothing to prove: pass DATA or --file"),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Command::Prove { data, file } => {
            println!("{}", digest_of(data, file)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { provided, expected } => {
            let verified = verify(&ContentDigest::from(provided), &ContentDigest::from(expected));
            println!("Verification result: {}", verified);
            Ok(if verified { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
