/// Escape a value for use inside a PowerShell single-quoted string.
/// Embedded single quotes are doubled.
pub fn escape_single_quote_content(value: &str) -> String {
    value.replace('\'', "''")
}

/// Quote a single argument for PowerShell execution.
/// - Empty strings become `''`
/// - Strings with PowerShell metacharacters are wrapped in single quotes
/// - Embedded single quotes are doubled
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    // Characters that require quoting
    const PS_META: &[char] = &[
        ' ', '\t', '\n', '\'', '"', '`', '$', '(', ')', '{', '}', '<', '>', '|', '&', ';', '@',
        '#', ',',
    ];

    if !arg.contains(PS_META) {
        return arg.to_string();
    }

    format!("'{}'", escape_single_quote_content(arg))
}

/// Quote and join multiple arguments for PowerShell execution.
pub fn quote_args(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote a path for PowerShell execution (always quotes).
pub fn quote_path(path: &str) -> String {
    format!("'{}'", escape_single_quote_content(path))
}
