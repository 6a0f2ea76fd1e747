use std::fmt;

/// The kind of a single script line, decided by its leading keyword.
///
/// Keywords are matched as exact, case-sensitive prefixes of the trimmed
/// line, so `Letter = 1` still classifies as [`StatementKind::Let`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    // Structure
    Blank,
    Comment,

    // Declarations
    Let,
    Assignment,

    // Control flow
    For,
    While,
    If,
    Elif,
    Else,

    // Actions
    Print,
    PlaceBlock,
    PlaceWall,
    Spawn,

    Unrecognized,
}

impl StatementKind {
    /// Kinds the top-level dispatch loop executes. Everything else is
    /// skipped there without a diagnostic.
    pub fn is_top_level(self) -> bool {
        matches!(
            self,
            StatementKind::Let
                | StatementKind::For
                | StatementKind::While
                | StatementKind::PlaceBlock
                | StatementKind::PlaceWall
                | StatementKind::Print
                | StatementKind::Spawn
        )
    }

    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            StatementKind::If | StatementKind::Elif | StatementKind::Else
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Blank => "blank",
            StatementKind::Comment => "comment",
            StatementKind::Let => "Let",
            StatementKind::Assignment => "assignment",
            StatementKind::For => "For",
            StatementKind::While => "While",
            StatementKind::If => "If",
            StatementKind::Elif => "Elif",
            StatementKind::Else => "Else",
            StatementKind::Print => "print",
            StatementKind::PlaceBlock => "placeBlock",
            StatementKind::PlaceWall => "placeWall",
            StatementKind::Spawn => "spawn",
            StatementKind::Unrecognized => "unrecognized",
        };
        write!(f, "{}", name)
    }
}

/// Leading keywords in match order. `placeBlock` and `placeWall` share no
/// prefix, but `Elif`/`Else` must be tried before the bare `If`.
const KEYWORDS: &[(&str, StatementKind)] = &[
    ("Let", StatementKind::Let),
    ("For", StatementKind::For),
    ("While", StatementKind::While),
    ("placeBlock", StatementKind::PlaceBlock),
    ("placeWall", StatementKind::PlaceWall),
    ("print", StatementKind::Print),
    ("spawn", StatementKind::Spawn),
    ("Elif", StatementKind::Elif),
    ("Else", StatementKind::Else),
    ("If", StatementKind::If),
];

pub fn classify(line: &str) -> StatementKind {
    let line = line.trim();
    if line.is_empty() {
        return StatementKind::Blank;
    }
    if line.starts_with(super::COMMENT_MARKER) {
        return StatementKind::Comment;
    }
    for (keyword, kind) in KEYWORDS {
        if line.starts_with(keyword) {
            return *kind;
        }
    }
    if line.contains('=') {
        StatementKind::Assignment
    } else {
        StatementKind::Unrecognized
    }
}
