mod target_framework_interner;
mod tree_walker;

pub use target_framework_interner::TargetFrameworkInterner;
pub use tree_walker::DependencyTreeWalker;
