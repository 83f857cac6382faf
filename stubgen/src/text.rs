// Plain text rendering of resolved method sets

use stubgen_resolver::{EntityKind, MethodSet, MethodSetView};

pub fn format_view_as_text(kind: EntityKind, name: &str, view: &MethodSetView) -> String {
    let mut out = format!("{} {}\n", kind, name);
    out.push_str(&format_set("full", &view.full));
    out.push_str(&format_set("inherited", &view.inherited));
    out.push_str(&format_set("unique", &view.unique));
    out
}

fn format_set(label: &str, set: &MethodSet) -> String {
    if set.is_empty() {
        return format!("  {}: (none)\n", label);
    }

    let mut out = format!("  {}:\n", label);
    for method in set {
        out.push_str(&format!("    {}\n", method));
    }
    out
}

pub fn format_views_as_text(views: &[(EntityKind, &str, MethodSetView)]) -> String {
    views
        .iter()
        .map(|(kind, name, view)| format_view_as_text(*kind, name, view))
        .collect::<Vec<_>>()
        .join("\n")
}
