use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mrkl::{Digest, ProofElem, proof::parse_hex_digest};
use tracing_subscriber::filter::LevelFilter;

/// Node hashing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashAlg {
    /// BLAKE2s-256 of the concatenated children, leaves used as given
    Blake2s,
    /// BLAKE2s-256, with every leaf hashed once more before it enters the tree
    Blake2sSpr,
    /// BLAKE3 of the concatenated children, leaves used as given
    Blake3,
    /// BLAKE3 with 0x00 leaf and 0x01 node prefixes
    Blake3Tagged,
    /// SHA-256 of the concatenated children, leaves used as given
    Sha256,
}

/// Output encoding for results written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Hex digests and `l`/`r` prefixed proof steps
    Text,
    /// One JSON document per command
    Json,
}

/// Log level options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages, including tree construction summaries
    Debug,
    /// Trace-level messages, one per reduced level
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mrkl")]
#[command(about = "Merkle roots and inclusion proofs over 32-byte leaves")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Hash strategy used to combine nodes
    #[arg(long, global = true, value_enum, env = "MRKL_ALG", default_value_t = HashAlg::Blake2s)]
    pub alg: HashAlg,

    /// Output format
    #[arg(long, global = true, value_enum, env = "MRKL_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Set log level (off, error, warn, info, debug, trace), defaults to warn
    #[arg(short = 'l', long, global = true, value_enum, env = "MRKL_LOG")]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Level for the default log directive. `--log-level` wins over `-v`.
    pub fn log_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the Merkle root of the leaves
    Root(LeafArgs),

    /// Create the inclusion proof for one leaf
    Proof {
        /// Position of the leaf, starting at 0
        index: usize,

        #[command(flatten)]
        leaves: LeafArgs,
    },

    /// Check a leaf against a root; exits with status 1 on mismatch
    Verify {
        /// Leaf digest as hex
        #[arg(value_parser = parse_hex_digest)]
        leaf: Digest,

        /// Expected root as hex
        #[arg(value_parser = parse_hex_digest)]
        root: Digest,

        /// Proof steps, each "l" or "r" followed by the sibling as hex
        steps: Vec<ProofElem<Digest>>,
    },

    /// Compute the root and the proof of every leaf
    Construct(LeafArgs),
}

/// Where the leaves come from.
#[derive(Debug, Args)]
pub struct LeafArgs {
    /// Packed leaf file: concatenated 32-byte digests, "-" for stdin
    #[arg(long, conflicts_with = "leaves")]
    pub file: Option<PathBuf>,

    /// Leaf digests as hex, in order
    #[arg(value_parser = parse_hex_digest, required_unless_present = "file")]
    pub leaves: Vec<Digest>,
}
