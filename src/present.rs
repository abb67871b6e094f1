//! Plain-text rendering of a finished session.

use crate::core::Session;

/// Render a 1-indexed listing of `session` followed by `achieved/target`.
///
/// # Example
///
/// ```rust
/// use session_designer::core::{Pose, Session};
/// use session_designer::present::render;
///
/// let session = Session::new().extended(Pose::new("Mountain", 30));
/// assert_eq!(render(&session, 40), "1. Mountain (30s)\nTotal duration: 30/40\n");
/// ```
pub fn render(session: &Session, target: u32) -> String {
    session.to_string() + &format!("Total duration: {}/{}\n", session.length(), target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Pose, Transition};

    #[test]
    fn empty_session_renders_summary_only() {
        assert_eq!(render(&Session::new(), 10), "Total duration: 0/10\n");
    }

    #[test]
    fn total_beyond_u32_renders_in_full() {
        let long = Pose::new("Long", u32::MAX);
        let session = Session::new()
            .extended(long.clone())
            .extended(Transition::new(long.clone(), long.clone(), 2))
            .extended(long);

        let rendered = render(&session, 10);
        assert!(rendered.ends_with("Total duration: 8589934592/10\n"));
        assert!(rendered.starts_with("1. Long (4294967295s)\n2. Long -> Long (2s)\n"));
    }

    #[test]
    fn elements_are_numbered_from_one() {
        let a = Pose::new("A", 30);
        let b = Pose::new("B", 30);
        let session = Session::new()
            .extended(a.clone())
            .extended(Transition::new(a, b.clone(), 10))
            .extended(b);

        let rendered = render(&session, 70);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1. A (30s)",
                "2. A -> B (10s)",
                "3. B (30s)",
                "Total duration: 70/70",
            ]
        );
    }
}
