/// One level of nesting.
pub const INDENT_TOKEN: &str = "\t";

/// Indentation string for the given nesting level.
pub fn indent(level: usize) -> String {
    INDENT_TOKEN.repeat(level)
}
