//! Parsing of free-text list inputs.
//!
//! List parameters stay text until generation so a malformed list becomes
//! an explanatory one-step trace instead of an error.

/// Parse a comma- or whitespace-separated list of integers.
///
/// # Errors
///
/// Returns a user-facing message if the list is empty or a token is not an
/// integer.
pub fn parse_number_list(text: &str) -> Result<Vec<i64>, String> {
    let mut values = Vec::new();
    for token in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let value = token
            .parse::<i64>()
            .map_err(|_| format!("'{token}' is not a whole number"))?;
        values.push(value);
    }
    if values.is_empty() {
        return Err("Please enter at least one number".to_string());
    }
    Ok(values)
}

/// Parse a list and enforce a maximum length.
///
/// # Errors
///
/// Returns a user-facing message if parsing fails or the list is too long.
pub fn parse_bounded_list(text: &str, max_len: usize) -> Result<Vec<i64>, String> {
    let values = parse_number_list(text)?;
    if values.len() > max_len {
        return Err(format!(
            "Please enter at most {max_len} numbers (got {})",
            values.len()
        ));
    }
    Ok(values)
}

/// Join numbers for display: `8, 4, 2, 1`.
#[must_use]
pub fn format_list(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a row of cells padded to a common width.
#[must_use]
pub fn format_row<T: ToString>(cells: &[T], width: usize) -> String {
    cells
        .iter()
        .map(|c| format!("{:>width$}", c.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
