//! Command sequences for plotter upkeep

/// Cycles used by `exercise` when no count is given
pub const DEFAULT_EXERCISE_ITERATIONS: u32 = 30;

/// Short down-and-back stroke used to work a dry pen
const EXERCISE_STROKE: &str = "DR10,250,10,-250";

/// Selects `pen`, then scribbles back and forth `iterations` times
pub fn pen_exercise(pen: u8, iterations: u32) -> Vec<String> {
    let mut commands = vec![
        format!("PS{}", pen),
        "MA100,100".to_string(),
        "PV5".to_string(),
    ];
    commands.extend((0..iterations).map(|_| EXERCISE_STROKE.to_string()));
    commands.push("PV7".to_string());
    commands.push("RS".to_string());
    commands
}

/// Extracts commands from a test-pattern script
///
/// One command per line; blank lines and `#` comments are skipped.
pub fn parse_test_pattern(script: &str) -> Vec<String> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_repeats_stroke() {
        let commands = pen_exercise(3, 2);
        assert_eq!(
            commands,
            vec!["PS3", "MA100,100", "PV5", EXERCISE_STROKE, EXERCISE_STROKE, "PV7", "RS"]
        );
    }

    #[test]
    fn zero_iterations_still_selects_and_restores() {
        let commands = pen_exercise(2, 0);
        assert_eq!(commands, vec!["PS2", "MA100,100", "PV5", "PV7", "RS"]);
    }

    #[test]
    fn default_exercise_length() {
        let commands = pen_exercise(1, DEFAULT_EXERCISE_ITERATIONS);
        let strokes = commands.iter().filter(|c| *c == EXERCISE_STROKE).count();
        assert_eq!(strokes, 30);
    }

    #[test]
    fn test_pattern_skips_comments_and_blanks() {
        let script = "# pen check\nPS1\n\n  MA100,100  \n#PS2\nDA200,200\n";
        assert_eq!(parse_test_pattern(script), vec!["PS1", "MA100,100", "DA200,200"]);
    }

    #[test]
    fn indented_comment_is_skipped() {
        assert!(parse_test_pattern("   # note\n\t\n").is_empty());
    }
}
