// Site owner constants.
// Mirrors the profile block the presentation layer renders from.

/// GitHub username whose repositories are listed.
pub const GITHUB_USERNAME: &str = "KerYagciHTL";

/// Curated repositories pinned to the front of the project grid,
/// in display order.
pub const FEATURED_REPOS: &[&str] = &[
    "Kerlib",
    "KCY-Accounting",
    "kxrim-dev",
    "K-Chat",
    "HtmlForge",
];

/// Repository whose issue tracker backs the visitor comments page.
pub const COMMENTS_OWNER: &str = "KerYagciHTL";
pub const COMMENTS_REPO: &str = "kxrim-dev";

/// Label marking an issue as a visitor comment.
pub const COMMENT_LABEL: &str = "portfolio-comment";

/// Default location of the static repository snapshot.
pub const FALLBACK_PATH: &str = "public/repos-fallback.json";
