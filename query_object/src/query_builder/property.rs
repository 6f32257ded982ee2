/// Column reference used by expression nodes
///
/// A bare name is qualified with the alias of the query it is rendered
/// against; a qualified pair is rendered as given, which disambiguates
/// columns of joined tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    Name(String),
    Qualified { qualifier: String, name: String },
}

impl Property {
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Property::Qualified {
            qualifier: qualifier.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Property::Name(name) => name,
            Property::Qualified { name, .. } => name,
        }
    }
}

impl From<&str> for Property {
    fn from(name: &str) -> Self {
        Property::Name(name.to_string())
    }
}

impl From<String> for Property {
    fn from(name: String) -> Self {
        Property::Name(name)
    }
}

impl From<&String> for Property {
    fn from(name: &String) -> Self {
        Property::Name(name.clone())
    }
}

impl From<(&str, &str)> for Property {
    fn from((qualifier, name): (&str, &str)) -> Self {
        Property::qualified(qualifier, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Property::from("aName"), Property::Name("aName".to_string()));
        assert_eq!(
            Property::from(("b", "uid")),
            Property::Qualified {
                qualifier: "b".to_string(),
                name: "uid".to_string()
            }
        );
        assert_eq!(Property::from(("b", "uid")).name(), "uid");
    }
}
