use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use nbtree_diff::{compute_diff_maps, DiffMaps, DiffSummary};
use nbtree_edit::{
    add_child, add_named_child, default_tag, set_element_from_text, set_value_from_text,
    try_move_child, try_remove_child_at, EditResult, EditSession, EditorMode,
};
use nbtree_types::{from_json, to_json, Tag, TagPath, TagType, TagValue};
use nbtree_validate::{check_structure, parse_element, IssueKind};

use crate::cli::*;
use crate::config::CliConfig;
use crate::render::{render_report, render_summary, render_tree};

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Show(args) => cmd_show(args, &format, config),
        Command::Check(args) => cmd_check(args, &format, config),
        Command::Diff(args) => cmd_diff(args, &format, config),
        Command::Set(args) => cmd_set(args, &format),
        Command::Add(args) => cmd_add(args, &format),
        Command::Rm(args) => {
            let (index, tree) = (args.index, read_tree(&args.file)?);
            commit_edit(tree, &args.file, &args.path, &args.out, &format, |node| {
                try_remove_child_at(node, index)
            })
        }
        Command::Mv(args) => {
            let (from, to, tree) = (args.from, args.to, read_tree(&args.file)?);
            commit_edit(tree, &args.file, &args.path, &args.out, &format, |node| {
                try_move_child(node, from, to)
            })
        }
    }
}

fn read_tree(path: &Path) -> anyhow::Result<Tag> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let tree = from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(tree)
}

fn write_tree(tree: &Tag, path: &Path) -> anyhow::Result<()> {
    let text = to_json(tree, true)?;
    fs::write(path, text + "\n").with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn cmd_show(args: ShowArgs, format: &OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let tree = read_tree(&args.file)?;
    let path = args.path.unwrap_or_default();
    let node = tree
        .get(&path)
        .with_context(|| format!("no tag at path {path}"))?;
    match format {
        OutputFormat::Json => println!("{}", to_json(node, true)?),
        OutputFormat::Text => print!("{}", render_tree(node, None, config.indent, false)),
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, format: &OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let tree = read_tree(&args.file)?;
    let mut report = check_structure(&tree);
    if !config.warn_duplicate_names {
        report
            .issues
            .retain(|i| !matches!(i.kind, IssueKind::DuplicateName { .. }));
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if report.issues.is_empty() => {
            println!("{} {} is well formed", "✓".green().bold(), args.file.display());
        }
        OutputFormat::Text => print!("{}", render_report(&report)),
    }

    let errors = report.errors().count();
    if errors > 0 {
        anyhow::bail!("{errors} structural error(s) in {}", args.file.display());
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let original = read_tree(&args.original)?;
    let edited = read_tree(&args.edited)?;
    let maps = compute_diff_maps(&original, &edited);
    let summary = maps.summary();

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&diff_report(&maps, summary)?)?);
        return Ok(());
    }

    let changed_only = args.changed_only || !config.show_unchanged;
    if args.side != Side::Edited {
        println!("{} {}", "---".bold(), args.original.display());
        print!(
            "{}",
            render_tree(&original, Some(&maps.original), config.indent, changed_only)
        );
    }
    if args.side != Side::Original {
        println!("{} {}", "+++".bold(), args.edited.display());
        print!(
            "{}",
            render_tree(&edited, Some(&maps.edited), config.indent, changed_only)
        );
    }
    println!("{}", render_summary(&summary));
    Ok(())
}

/// Both annotation maps plus the summary counts, as printed by `diff --format json`.
fn diff_report(maps: &DiffMaps, summary: DiffSummary) -> anyhow::Result<serde_json::Value> {
    let mut value = serde_json::to_value(maps)?;
    value["summary"] = serde_json::to_value(summary)?;
    Ok(value)
}

fn cmd_set(args: SetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let tree = read_tree(&args.file)?;
    let value = args.value.as_str();
    match args.index {
        Some(index) => commit_edit(tree, &args.file, &args.path, &args.out, format, |node| {
            set_element_from_text(node, index, value)
        }),
        None => commit_edit(tree, &args.file, &args.path, &args.out, format, |node| {
            set_value_from_text(node, value)
        }),
    }
}

fn cmd_add(args: AddArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let tree = read_tree(&args.file)?;
    let target = tree
        .get(&args.path)
        .with_context(|| format!("no tag at path {}", args.path))?;

    match target.tag_type() {
        Some(TagType::Container(kind)) if kind.is_typed_array() => {
            let element = parse_element(kind, &args.value)?;
            commit_edit(tree, &args.file, &args.path, &args.out, format, |node| {
                add_child(node, element)
            })
        }
        _ => {
            let tag_type = args
                .tag_type
                .or_else(|| list_item_type(target))
                .context("--type is required to add to a list or compound")?;
            let child = default_tag(tag_type, args.name.as_str())?;
            commit_edit(tree, &args.file, &args.path, &args.out, format, |node| {
                add_named_child(node, child)
            })
        }
    }
}

/// The type shared by a list's items, taken from its first item.
fn list_item_type(tag: &Tag) -> Option<TagType> {
    match &tag.value {
        TagValue::List(items) => items.first().and_then(Tag::tag_type),
        _ => None,
    }
}

/// Apply `edit` to the node at `path` and write the new tree.
fn commit_edit<F>(
    tree: Tag,
    file: &Path,
    path: &TagPath,
    out: &OutputArgs,
    format: &OutputFormat,
    edit: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&Tag) -> EditResult<Tag>,
{
    let mut session = EditSession::from_original(tree, EditorMode::EditDiff);
    session
        .apply_at(path, edit)
        .with_context(|| format!("editing {path} in {}", file.display()))?;
    let summary = session
        .diff()
        .map(|maps| maps.summary())
        .unwrap_or_default();

    let target = out.output.as_deref().unwrap_or(file);
    write_tree(session.edited(), target)?;
    report_written(target, &summary, format)
}

fn report_written(target: &Path, summary: &DiffSummary, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "written": target.display().to_string(),
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => println!(
            "{} wrote {} ({})",
            "✓".green().bold(),
            target.display(),
            render_summary(summary)
        ),
    }
    Ok(())
}
