
const PRINT_PREFIX: &str = "PRINT ";
const QUERY_PREFIX: &str = "QUERY ";
const COMMENT_MARKER: &str = "//";

/// One line of a search script
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Dump one index (`id`, `name`, `region` or `type`)
    Print(String),
    /// Run a query string against the index
    Query(String),
    /// A non-empty line that is neither PRINT nor QUERY
    Unknown(String),
}

impl Command {
    /// Parse one script line.
    ///
    /// Everything from `//` onwards is a comment. Returns `None` for lines
    /// that are empty once the comment is removed.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = match line.find(COMMENT_MARKER) {
            Some(idx) => &line[..idx],
            None => line,
        };
        if line.is_empty() {
            return None;
        }

        let command = if let Some(selector) = line.strip_prefix(PRINT_PREFIX) {
            Command::Print(selector.to_string())
        } else if let Some(query) = line.strip_prefix(QUERY_PREFIX) {
            Command::Query(query.to_string())
        } else {
            Command::Unknown(line.to_string())
        };
        Some(command)
    }

    /// Parse a whole script, skipping blank and comment-only lines
    pub fn parse_script(script: &str) -> Vec<Self> {
        script.lines().filter_map(Self::parse_line).collect()
    }

    /// The command as it appeared in the script
    pub fn text(&self) -> String {
        match self {
            Command::Print(selector) => format!("{}{}", PRINT_PREFIX, selector),
            Command::Query(query) => format!("{}{}", QUERY_PREFIX, query),
            Command::Unknown(line) => line.clone(),
        }
    }
}
