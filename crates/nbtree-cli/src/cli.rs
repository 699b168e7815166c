use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use nbtree_types::{TagPath, TagType};

#[derive(Parser)]
#[command(
    name = "nbtree",
    about = "Inspect, edit and diff named-tag trees stored as JSON",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./nbtree.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Side {
    Original,
    Edited,
    Both,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a tree or one of its subtrees
    Show(ShowArgs),
    /// Check terminator placement, duplicate names and unknown types
    Check(CheckArgs),
    /// Annotate an original and an edited tree with their differences
    Diff(DiffArgs),
    /// Assign a value to a leaf or a typed array element
    Set(SetArgs),
    /// Append a default child to a container
    Add(AddArgs),
    /// Remove the child at an index
    Rm(RmArgs),
    /// Move a child before another position
    Mv(MvArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    pub file: PathBuf,
    /// Path of the subtree to print, e.g. 0/2
    #[arg(long)]
    pub path: Option<TagPath>,
}

#[derive(Args)]
pub struct CheckArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    pub original: PathBuf,
    pub edited: PathBuf,
    #[arg(long, value_enum, default_value = "both")]
    pub side: Side,
    /// Print only annotated nodes
    #[arg(long)]
    pub changed_only: bool,
}

/// Where a mutated tree is written: `--output`, or back over the input file.
#[derive(Args)]
pub struct OutputArgs {
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SetArgs {
    pub file: PathBuf,
    pub path: TagPath,
    pub value: String,
    /// Element index, when the target is a typed array
    #[arg(long)]
    pub index: Option<usize>,
    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Args)]
pub struct AddArgs {
    pub file: PathBuf,
    pub path: TagPath,
    /// Type of the new child of a list or compound
    #[arg(long = "type")]
    pub tag_type: Option<TagType>,
    #[arg(long, default_value = "")]
    pub name: String,
    /// Element value, when the target is a typed array
    #[arg(long, default_value = "0")]
    pub value: String,
    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Args)]
pub struct RmArgs {
    pub file: PathBuf,
    pub path: TagPath,
    pub index: usize,
    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Args)]
pub struct MvArgs {
    pub file: PathBuf,
    pub path: TagPath,
    pub from: usize,
    pub to: usize,
    #[command(flatten)]
    pub out: OutputArgs,
}
