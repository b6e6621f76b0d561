use crate::application::read_models::{DependencyNodeView, SnapshotReport, TargetView};
use crate::ports::outbound::SnapshotFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// TreeFormatter adapter rendering one indented tree per target framework
///
/// Invisible dependencies are left out. Unresolved dependencies are shown in
/// red when colors are enabled.
pub struct TreeFormatter {
    colored: bool,
}

impl TreeFormatter {
    pub fn new() -> Self {
        Self { colored: false }
    }

    pub fn with_colors(colored: bool) -> Self {
        Self { colored }
    }

    fn write_target(&self, output: &mut String, target: &TargetView) -> std::fmt::Result {
        let count = target.dependency_count;
        let plural = if count == 1 { "dependency" } else { "dependencies" };
        let heading = if target.is_active {
            format!("{} (active, {} {})", target.target_framework, count, plural)
        } else {
            format!("{} ({} {})", target.target_framework, count, plural)
        };

        if self.colored {
            writeln!(output, "{}", heading.bold())?;
        } else {
            writeln!(output, "{}", heading)?;
        }

        let visible: Vec<&DependencyNodeView> =
            target.dependencies.iter().filter(|node| node.visible).collect();
        for (index, node) in visible.iter().enumerate() {
            self.write_node(output, node, "", index + 1 == visible.len())?;
        }
        Ok(())
    }

    fn write_node(
        &self,
        output: &mut String,
        node: &DependencyNodeView,
        prefix: &str,
        last: bool,
    ) -> std::fmt::Result {
        let connector = if last { LAST_BRANCH } else { BRANCH };
        writeln!(output, "{}{}{}", prefix, connector, self.label(node))?;

        let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
        let visible: Vec<&DependencyNodeView> =
            node.children.iter().filter(|child| child.visible).collect();
        for (index, child) in visible.iter().enumerate() {
            self.write_node(output, child, &child_prefix, index + 1 == visible.len())?;
        }
        Ok(())
    }

    fn label(&self, node: &DependencyNodeView) -> String {
        let mut markers = Vec::new();
        if !node.resolved {
            markers.push("unresolved");
        }
        if node.implicit {
            markers.push("implicit");
        }
        if node.cycle {
            markers.push("cycle");
        }
        if node.shared {
            markers.push("shared");
        }

        let caption = if self.colored && !node.resolved {
            node.caption.red().to_string()
        } else {
            node.caption.clone()
        };

        if markers.is_empty() {
            caption
        } else if self.colored {
            format!("{} {}", caption, format!("[{}]", markers.join(", ")).dimmed())
        } else {
            format!("{} [{}]", caption, markers.join(", "))
        }
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotFormatter for TreeFormatter {
    fn format(&self, report: &SnapshotReport) -> Result<String> {
        let mut output = String::new();
        let metadata = &report.metadata;
        let summary = &report.summary;

        writeln!(output, "Project: {}", metadata.project_path)?;
        if !metadata.active_target_framework.is_empty() {
            writeln!(output, "Active target framework: {}", metadata.active_target_framework)?;
        }

        for target in &report.targets {
            writeln!(output)?;
            self.write_target(&mut output, target)?;
        }

        if report.targets.is_empty() {
            writeln!(output)?;
            writeln!(output, "No dependencies")?;
        }

        writeln!(output)?;
        writeln!(
            output,
            "Summary: {} target framework(s), {} dependencies, unresolved: {}",
            summary.target_frameworks,
            summary.dependencies,
            if summary.has_unresolved_dependency { "yes" } else { "no" }
        )?;

        Ok(output)
    }
}
