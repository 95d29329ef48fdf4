use super::TargetKind;

/// Patterns that only make sense for bundled applications.
const WEBAPP_ONLY: &[&str] = &["/dist"];

/// Patterns that only make sense for published libraries, where compiled
/// output sits next to the sources.
const NPM_ONLY: &[&str] = &["*.js", "*.d.ts", "*.js.map", "!/types/*.d.ts"];

/// Whether an ignore-file line applies to `target`.
pub fn keep_ignore_line(line: &str, target: TargetKind) -> bool {
    let pattern = line.trim_end();
    (target == TargetKind::Webapp || !WEBAPP_ONLY.contains(&pattern))
        && (target == TargetKind::Npm || !NPM_ONLY.contains(&pattern))
}

/// Filter an ignore-file template for `target`, keeping line endings intact.
pub fn filter_ignore(template: &str, target: TargetKind) -> String {
    template
        .split_inclusive('\n')
        .filter(|line| keep_ignore_line(line.trim_end_matches(['\n', '\r']), target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "node_modules\n/dist\n*.js\n*.d.ts\n*.js.map\n!/types/*.d.ts\n.idea/workspace.xml\n";

    #[test]
    fn npm_drops_dist() {
        assert_eq!(
            filter_ignore(TEMPLATE, TargetKind::Npm),
            "node_modules\n*.js\n*.d.ts\n*.js.map\n!/types/*.d.ts\n.idea/workspace.xml\n"
        );
    }

    #[test]
    fn webapp_drops_compiled_output_patterns() {
        assert_eq!(
            filter_ignore(TEMPLATE, TargetKind::Webapp),
            "node_modules\n/dist\n.idea/workspace.xml\n"
        );
    }

    #[test]
    fn crlf_lines_are_recognized() {
        assert_eq!(filter_ignore("a\r\n/dist\r\n", TargetKind::Npm), "a\r\n");
    }

    #[test]
    fn unterminated_last_line_survives() {
        assert_eq!(filter_ignore("a\nb", TargetKind::Webapp), "a\nb");
    }
}
