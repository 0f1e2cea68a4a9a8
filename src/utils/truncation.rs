const MAX_OUTPUT_LENGTH: usize = 8_000;
const MAX_ERROR_LENGTH: usize = 2_000;

/// Truncate long free-form output (engine responses, serialized inventories)
/// for logging, keeping the head and tail.
pub fn truncate_output(output: &str) -> String {
    if output.len() <= MAX_OUTPUT_LENGTH {
        return output.to_string();
    }
    let half = MAX_OUTPUT_LENGTH / 2;
    let start = &output[..floor_char_boundary(output, half)];
    let end = &output[floor_char_boundary(output, output.len() - half)..];
    format!(
        "{}\n\n... [truncated {} chars] ...\n\n{}",
        start,
        output.len() - MAX_OUTPUT_LENGTH,
        end
    )
}

/// Truncate an error message before persisting it to the review record.
pub fn truncate_error(error: &str) -> String {
    if error.len() <= MAX_ERROR_LENGTH {
        error.to_string()
    } else {
        format!("{}...", &error[..floor_char_boundary(error, MAX_ERROR_LENGTH)])
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_output_unchanged() {
        assert_eq!(truncate_output("hello"), "hello");
        assert_eq!(truncate_error("oops"), "oops");
    }

    #[test]
    fn test_long_output_keeps_head_and_tail() {
        let long = "a".repeat(20_000);
        let truncated = truncate_output(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_long_error_truncated() {
        let long = "e".repeat(5_000);
        let truncated = truncate_error(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= MAX_ERROR_LENGTH + 3);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "é".repeat(3_000); // 2 bytes each
        let truncated = truncate_error(&long);
        assert!(truncated.ends_with("..."));
    }
}
