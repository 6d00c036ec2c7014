use std::{
    fs,
    io::{self, Read, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use mrkl::{
    Blake2s256Merge, Blake2sSpr, Blake3Merge, Blake3Tagged, Digest, Merge, Proof, ProofElem,
    Sha256Merge, packed, proof::proof_to_text,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Cli, Command, HashAlg, LeafArgs, OutputFormat};

#[derive(Serialize)]
struct RootOutput {
    root: String,
}

#[derive(Serialize)]
struct ProofOutput<'a> {
    index: usize,
    proof: &'a [ProofElem<Digest>],
}

#[derive(Serialize)]
struct ConstructOutput<'a> {
    root: String,
    proofs: &'a [Proof<Digest>],
}

#[derive(Serialize)]
struct VerifyOutput {
    included: bool,
    computed_root: String,
}

/// Run the parsed command with the selected hash strategy.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    match cli.alg {
        HashAlg::Blake2s => execute::<Blake2s256Merge>(cli),
        HashAlg::Blake2sSpr => execute::<Blake2sSpr>(cli),
        HashAlg::Blake3 => execute::<Blake3Merge>(cli),
        HashAlg::Blake3Tagged => execute::<Blake3Tagged>(cli),
        HashAlg::Sha256 => execute::<Sha256Merge>(cli),
    }
}

fn execute<M: Merge<Hash = Digest>>(cli: &Cli) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    match &cli.command {
        Command::Root(args) => {
            let leaves = load_leaves(args)?;
            let root = mrkl::compute_root::<M>(&leaves).context("failed to compute root")?;
            match cli.format {
                OutputFormat::Text => writeln!(out, "{}", hex::encode(root))?,
                OutputFormat::Json => write_json(
                    &mut out,
                    &RootOutput {
                        root: hex::encode(root),
                    },
                )?,
            }
        }
        Command::Proof { index, leaves } => {
            let leaves = load_leaves(leaves)?;
            let proof = mrkl::create_proof::<M>(*index, &leaves)
                .with_context(|| format!("failed to create proof for leaf {}", index))?;
            debug!(index, steps = proof.len(), "created proof");
            match cli.format {
                OutputFormat::Text => writeln!(out, "{}", proof_to_text(&proof))?,
                OutputFormat::Json => write_json(
                    &mut out,
                    &ProofOutput {
                        index: *index,
                        proof: &proof,
                    },
                )?,
            }
        }
        Command::Verify { leaf, root, steps } => {
            let computed = mrkl::verify_proof::<M>(leaf, steps);
            let included = &computed == root;
            info!(included, steps = steps.len(), "verified proof");
            match cli.format {
                OutputFormat::Text => {
                    writeln!(out, "{}", if included { "ok" } else { "mismatch" })?
                }
                OutputFormat::Json => write_json(
                    &mut out,
                    &VerifyOutput {
                        included,
                        computed_root: hex::encode(computed),
                    },
                )?,
            }
            if !included {
                out.flush()?;
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Construct(args) => {
            let leaves = load_leaves(args)?;
            let (root, proofs) = mrkl::construct::<M>(&leaves).context("failed to construct tree")?;
            match cli.format {
                OutputFormat::Text => {
                    writeln!(out, "{}", hex::encode(root))?;
                    for proof in &proofs {
                        writeln!(out, "{}", proof_to_text(proof))?;
                    }
                }
                OutputFormat::Json => write_json(
                    &mut out,
                    &ConstructOutput {
                        root: hex::encode(root),
                        proofs: &proofs,
                    },
                )?,
            }
        }
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Leaves from the hex arguments or the packed file.
fn load_leaves(args: &LeafArgs) -> Result<Vec<Digest>> {
    let Some(path) = &args.file else {
        return Ok(args.leaves.clone());
    };
    let bytes = if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read leaves from stdin")?;
        bytes
    } else {
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    debug!(bytes = bytes.len(), "read packed leaves");
    packed::split_leaves(&bytes).with_context(|| format!("invalid leaf file {}", path.display()))
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("failed to write JSON output")?;
    writeln!(out)?;
    Ok(())
}
