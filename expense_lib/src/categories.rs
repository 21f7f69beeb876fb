use serde::{Deserialize, Serialize};

/// How an expense is grouped when listed.
///
/// The two standard groups are Business and Personal.  Any other label is
/// still accepted and kept verbatim in `Other`, so that nothing the user
/// types is lost.
///
/// Categories are compared by label, so `Other("Business")` is the same
/// category as `Business`, just as both are written the same in JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Business,
    Personal,
    Other(String),
}

impl Category {
    /// The categories offered by the entry form, in display order.
    pub const STANDARD: [Category; 2] = [Category::Personal, Category::Business];

    pub fn label(&self) -> &str {
        match self {
            Category::Business => "Business",
            Category::Personal => "Personal",
            Category::Other(label) => label,
        }
    }

    pub fn is_standard(&self) -> bool {
        match self {
            Category::Business | Category::Personal => true,
            Category::Other(_) => false,
        }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.label() == other.label()
    }
}

impl Eq for Category {}

impl std::hash::Hash for Category {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.label().hash(state);
    }
}

impl From<&str> for Category {
    /// Standard labels are matched case-insensitively, everything else
    /// becomes `Other` with surrounding blanks removed.
    fn from(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("business") {
            Category::Business
        } else if label.eq_ignore_ascii_case("personal") {
            Category::Personal
        } else {
            Category::Other(label.to_string())
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            Category::Business | Category::Personal => {
                category.label().to_string()
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod test {
    use crate::categories::Category;
    use std::collections::HashSet;

    #[test]
    fn test_parse() {
        assert_eq!(Category::from("Business"), Category::Business);
        assert_eq!(Category::from("personal"), Category::Personal);
        assert_eq!(Category::from(" PERSONAL "), Category::Personal);
        assert_eq!(
            Category::from("Travel"),
            Category::Other("Travel".to_string())
        );
        assert_eq!(Category::from(""), Category::Other(String::new()));
        assert_eq!(Category::default(), Category::Business);
    }

    #[test]
    fn test_label() {
        assert_eq!(Category::Personal.to_string(), "Personal");
        assert_eq!(Category::Other("Gifts".into()).label(), "Gifts");
        assert!(Category::Business.is_standard());
        assert!(!Category::Other("Business trip".into()).is_standard());
        assert_eq!(String::from(Category::Business), "Business");
    }

    #[test]
    fn test_equal_by_label() {
        let spelled_out = Category::Other("Business".into());
        assert_eq!(spelled_out, Category::Business);
        assert_ne!(Category::Other("business".into()), Category::Business);

        let set: HashSet<Category> =
            [spelled_out.clone(), Category::Business].into_iter().collect();
        assert_eq!(set.len(), 1);

        // Equal values are written the same and read back equal
        let json = serde_json::to_string(&spelled_out).unwrap();
        assert_eq!(json, serde_json::to_string(&Category::Business).unwrap());
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spelled_out);
        assert!(back.is_standard());
    }
}
