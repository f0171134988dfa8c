/// What the user picked from a listed channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Zero-based position in the listing
    Index(usize),
    Back,
    Quit,
    Invalid(String),
}

impl Selection {
    /// Parse `all`, `b`, `q` or a 1-based video number out of `count`
    pub fn parse(input: &str, count: usize) -> Self {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "all" => Selection::All,
            "b" => Selection::Back,
            "q" => Selection::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => Selection::Index(n - 1),
                Ok(_) => Selection::Invalid("Invalid selection! Please try again.".to_string()),
                Err(_) => Selection::Invalid("Invalid input! Please enter a number, 'all', 'b', or 'q'.".to_string()),
            },
        }
    }
}
