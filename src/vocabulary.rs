//! Keywords, operators and function names of the AQL surface the builder emits.

/// A clause keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    For,
    In,
    Let,
    Filter,
    Return,
    Collect,
    Into,
    Sort,
    Limit,
    And,
    Or,
    Not,
}

impl Keyword {
    pub const ALL: [Keyword; 12] = [
        Keyword::For,
        Keyword::In,
        Keyword::Let,
        Keyword::Filter,
        Keyword::Return,
        Keyword::Collect,
        Keyword::Into,
        Keyword::Sort,
        Keyword::Limit,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::For => "FOR",
            Keyword::In => "IN",
            Keyword::Let => "LET",
            Keyword::Filter => "FILTER",
            Keyword::Return => "RETURN",
            Keyword::Collect => "COLLECT",
            Keyword::Into => "INTO",
            Keyword::Sort => "SORT",
            Keyword::Limit => "LIMIT",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
        }
    }

    /// AQL keywords are case-insensitive, so `filter` is reserved too.
    pub fn is_reserved(word: &str) -> bool {
        Self::ALL
            .iter()
            .any(|k| k.as_str().eq_ignore_ascii_case(word))
            || ["null", "true", "false"]
                .iter()
                .any(|lit| lit.eq_ignore_ascii_case(word))
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Like,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Eq => write!(f, "=="),
            Comparison::Ne => write!(f, "!="),
            Comparison::Lt => write!(f, "<"),
            Comparison::Lte => write!(f, "<="),
            Comparison::Gt => write!(f, ">"),
            Comparison::Gte => write!(f, ">="),
            Comparison::In => write!(f, "IN"),
            Comparison::NotIn => write!(f, "NOT IN"),
            Comparison::Like => write!(f, "LIKE"),
        }
    }
}

/// Sort direction for SORT clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Standard AQL functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Concat,
    Contains,
    Document,
    Edges,
    First,
    Length,
    Lower,
    ToBool,
    ToList,
    ToNumber,
    ToString,
    Upper,
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Function::Concat => write!(f, "CONCAT"),
            Function::Contains => write!(f, "CONTAINS"),
            Function::Document => write!(f, "DOCUMENT"),
            Function::Edges => write!(f, "EDGES"),
            Function::First => write!(f, "FIRST"),
            Function::Length => write!(f, "LENGTH"),
            Function::Lower => write!(f, "LOWER"),
            Function::ToBool => write!(f, "TO_BOOL"),
            Function::ToList => write!(f, "TO_LIST"),
            Function::ToNumber => write!(f, "TO_NUMBER"),
            Function::ToString => write!(f, "TO_STRING"),
            Function::Upper => write!(f, "UPPER"),
        }
    }
}
