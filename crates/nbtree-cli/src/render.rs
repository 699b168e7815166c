//! Text rendering of trees, diff annotations and check reports.

use std::collections::BTreeMap;
use std::fmt::Write;

use colored::{ColoredString, Colorize};

use nbtree_diff::{DiffStatus, DiffSummary};
use nbtree_types::{Tag, TagPath, TagValue};
use nbtree_validate::{format_elements, format_value, IssueKind, Severity, StructureReport};

/// Render `root` one node per line, indented by depth.
///
/// With `statuses`, annotated lines are coloured by status. With
/// `changed_only`, unannotated nodes are skipped and each remaining line is
/// prefixed with its path instead of being indented.
pub fn render_tree(
    root: &Tag,
    statuses: Option<&BTreeMap<TagPath, DiffStatus>>,
    indent: usize,
    changed_only: bool,
) -> String {
    let mut out = String::new();
    for (path, tag) in root.walk() {
        let status = statuses.and_then(|m| m.get(&path)).copied();
        if changed_only && status.is_none() {
            continue;
        }
        let line = match status {
            Some(s) => format!("{} {}", paint(&describe(tag), s), format!("({s})").dimmed()),
            None => describe(tag),
        };
        if changed_only {
            let _ = writeln!(out, "{:<10} {line}", path.to_string());
        } else {
            let _ = writeln!(out, "{}{line}", " ".repeat(indent * path.depth()));
        }
    }
    out
}

/// One-line description of a node: name, type label and value or size.
pub fn describe(tag: &Tag) -> String {
    let label = match tag.tag_type() {
        Some(t) => t.label(),
        None => {
            return format!(
                "{}<unknown type {:?}>",
                name_prefix(tag),
                tag.value.type_name()
            )
        }
    };
    let body = match &tag.value {
        TagValue::CompoundEnd => return label.to_string(),
        TagValue::String(s) => format!(" = {s:?}"),
        TagValue::List(items) => format!(" ({} entries)", items.len()),
        TagValue::Compound(children) => {
            let named = children.iter().filter(|c| !c.is_end()).count();
            format!(" ({named} entries)")
        }
        value => match (format_value(value), format_elements(value)) {
            (Some(text), _) => format!(" = {text}"),
            (None, Some(elements)) => format!(" = [{}]", elements.join(", ")),
            (None, None) => String::new(),
        },
    };
    format!("{}[{label}]{body}", name_prefix(tag))
}

fn name_prefix(tag: &Tag) -> String {
    if tag.name.is_empty() {
        String::new()
    } else {
        format!("{} ", tag.name)
    }
}

fn paint(text: &str, status: DiffStatus) -> ColoredString {
    match status {
        DiffStatus::Added => text.green(),
        DiffStatus::Modified => text.truecolor(255, 165, 0),
        DiffStatus::Deleted => text.red(),
    }
}

pub fn render_summary(summary: &DiffSummary) -> String {
    if summary.total() == 0 {
        return "no changes".to_string();
    }
    format!(
        "{} added, {} modified, {} deleted",
        summary.added.to_string().green(),
        summary.modified.to_string().truecolor(255, 165, 0),
        summary.deleted.to_string().red()
    )
}

pub fn render_report(report: &StructureReport) -> String {
    let mut out = String::new();
    for issue in &report.issues {
        let severity = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow(),
        };
        let _ = writeln!(
            out,
            "{severity:<7} {:<10} {}",
            issue.path.to_string(),
            describe_issue(&issue.kind)
        );
    }
    out
}

fn describe_issue(kind: &IssueKind) -> String {
    match kind {
        IssueKind::MissingCompoundEnd => "compound has no terminator".into(),
        IssueKind::CompoundEndNotLast => "terminator is not the last child".into(),
        IssueKind::ExtraCompoundEnd => "compound has more than one terminator".into(),
        IssueKind::CompoundEndOutsideCompound => "terminator outside a compound".into(),
        IssueKind::DuplicateName { name, count } => {
            format!("name {name:?} used {count} times")
        }
        IssueKind::UnknownType { type_name } => format!("unknown tag type {type_name:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbtree_validate::check_structure;

    fn plain() {
        colored::control::set_override(false);
    }

    fn sample() -> Tag {
        Tag::compound(
            "root",
            [
                Tag::new("b", TagValue::Byte(-1)),
                Tag::new("s", TagValue::String("hi".into())),
                Tag::list("l", [Tag::new("", TagValue::Int(3))]),
                Tag::new("arr", TagValue::IntArray(vec![1, 2])),
            ],
        )
    }

    #[test]
    fn describe_nodes() {
        plain();
        let tree = sample();
        assert_eq!(describe(&tree), "root [Compound] (4 entries)");
        assert_eq!(describe(&tree.children()[0]), "b [Byte] = FF");
        assert_eq!(describe(&tree.children()[1]), "s [String] = \"hi\"");
        assert_eq!(describe(&tree.children()[2]), "l [List] (1 entries)");
        assert_eq!(describe(&tree.children()[3]), "arr [Int[]] = [1, 2]");
        assert_eq!(describe(&tree.children()[4]), "End");
    }

    #[test]
    fn describe_unknown() {
        let odd = Tag::new(
            "x",
            TagValue::Unknown {
                type_name: "shortArray".into(),
                raw: serde_json::Value::Null,
            },
        );
        assert_eq!(describe(&odd), "x <unknown type \"shortArray\">");
    }

    #[test]
    fn tree_is_indented_by_depth() {
        plain();
        let text = render_tree(&sample(), None, 2, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "root [Compound] (4 entries)");
        assert_eq!(lines[3], "  l [List] (1 entries)");
        assert_eq!(lines[4], "    [Int] = 3");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn changed_only_lists_annotated_paths() {
        plain();
        let mut statuses = BTreeMap::new();
        statuses.insert(TagPath::from(vec![2, 0]), DiffStatus::Modified);
        let text = render_tree(&sample(), Some(&statuses), 2, true);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("/2/0"));
        assert!(text.trim_end().ends_with("[Int] = 3 (modified)"));
    }

    #[test]
    fn summary_text() {
        plain();
        assert_eq!(render_summary(&DiffSummary::default()), "no changes");
        let s = DiffSummary {
            added: 1,
            modified: 2,
            deleted: 0,
        };
        assert_eq!(render_summary(&s), "1 added, 2 modified, 0 deleted");
    }

    #[test]
    fn report_lines() {
        plain();
        let tree = Tag::new("", TagValue::Compound(vec![Tag::new("a", TagValue::Int(1))]));
        let text = render_report(&check_structure(&tree));
        assert!(text.contains("compound has no terminator"));
        assert!(text.starts_with("error"));
    }
}
