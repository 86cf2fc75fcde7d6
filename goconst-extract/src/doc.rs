//! Comment text normalisation.

use goconst_core::ast::CommentGroup;

/// Join a comment group into doc text: markers stripped, each line trimmed,
/// lines joined with `\n`.
///
/// A block comment contributes one line per source line.
pub fn doc_text(group: &CommentGroup) -> String {
    let mut lines = Vec::new();
    for comment in &group.list {
        if let Some(body) = comment.strip_prefix("//") {
            lines.push(body.trim().to_string());
        } else if let Some(body) = comment
            .strip_prefix("/*")
            .and_then(|c| c.strip_suffix("*/"))
        {
            lines.extend(body.trim().lines().map(|l| l.trim().to_string()));
        } else {
            lines.push(comment.trim().to_string());
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(list: &[&str]) -> CommentGroup {
        CommentGroup {
            list: list.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn line_comments_are_stripped_and_trimmed() {
        let g = group(&["// User has been added to the system", "//   Indicates that somthing foo  "]);
        assert_eq!(
            doc_text(&g),
            "User has been added to the system\nIndicates that somthing foo"
        );
    }

    #[test]
    fn marker_without_space() {
        assert_eq!(doc_text(&group(&["//tight"])), "tight");
    }

    #[test]
    fn block_comment_lines() {
        assert_eq!(doc_text(&group(&["/* one */"])), "one");
        assert_eq!(doc_text(&group(&["/*\n first\n second\n*/"])), "first\nsecond");
    }

    #[test]
    fn empty_group_is_empty_text() {
        assert_eq!(doc_text(&CommentGroup::default()), "");
    }
}
