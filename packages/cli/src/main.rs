use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use merkle::{Proof, Sha256Tree};
use sha2::Sha256;

#[derive(Parser, Debug)]
#[command(
    name = "merkle-cli",
    version,
    about = "Build Merkle trees and check inclusion proofs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a tree over the items and print its root commitment as hex
    Root {
        /// Items, one per argument; bytes are taken verbatim
        items: Vec<String>,

        /// Read items from a file instead, one per line
        #[arg(long, conflicts_with = "items")]
        file: Option<PathBuf>,
    },
    /// Generate an inclusion proof for one item, printed as JSON
    Prove {
        /// The item to prove
        #[arg(long)]
        item: String,

        /// Items the tree is built over
        items: Vec<String>,

        /// Read items from a file instead, one per line
        #[arg(long, conflicts_with = "items")]
        file: Option<PathBuf>,

        /// Write the proof here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check a JSON proof against a root commitment
    Verify {
        /// The item the proof claims is included
        #[arg(long)]
        item: String,

        /// Expected root commitment, hex
        #[arg(long)]
        root: String,

        /// Proof file; stdin when omitted
        #[arg(long)]
        proof: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    match cli.command {
        Command::Root { items, file } => {
            let items = collect_items(items, file.as_deref())?;
            let tree = Sha256Tree::build(&items)?;
            println!("{}", tree.root_hex());
        }
        Command::Prove {
            item,
            items,
            file,
            out,
        } => {
            let items = collect_items(items, file.as_deref())?;
            let tree = Sha256Tree::build(&items)?;
            let proof = tree
                .prove(item.as_bytes())
                .with_context(|| format!("no node for item {item:?}"))?;
            let encoded = serde_json::to_string_pretty(&proof)?;
            match out {
                Some(path) => fs::write(&path, encoded)
                    .with_context(|| format!("writing proof to {}", path.display()))?,
                None => println!("{encoded}"),
            }
        }
        Command::Verify { item, root, proof } => {
            let root = hex::decode(root.trim()).context("root is not valid hex")?;
            let proof = read_proof(proof.as_deref())?;
            if !proof.verify::<Sha256>(item.as_bytes(), &root) {
                bail!("proof does not verify for item {item:?}");
            }
            println!("OK");
        }
    }
    Ok(())
}

fn collect_items(args: Vec<String>, file: Option<&Path>) -> Result<Vec<Vec<u8>>> {
    let items: Vec<Vec<u8>> = match file {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading items from {}", path.display()))?;
            raw.lines().map(|line| line.as_bytes().to_vec()).collect()
        }
        None => args.into_iter().map(String::into_bytes).collect(),
    };
    debug!("{} items collected", items.len());
    Ok(items)
}

fn read_proof(path: Option<&Path>) -> Result<Proof> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading proof from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading proof from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("proof is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_excludes_positional_items() {
        let err = Cli::try_parse_from(["merkle-cli", "root", "--file", "items.txt", "a", "b"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        let err = Cli::try_parse_from([
            "merkle-cli", "prove", "--item", "a", "--file", "items.txt", "b",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from(["merkle-cli", "root", "a", "b"]).is_ok());
        assert!(Cli::try_parse_from(["merkle-cli", "root", "--file", "items.txt"]).is_ok());
    }
}
