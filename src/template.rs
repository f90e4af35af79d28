use lazy_static::*;
use regex::{Captures, Regex};
use std::fmt::Display;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{(?P<index>\d+)\}").expect("Regex compilation error");
}

/// Name pattern with positional `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pattern: String,
}

impl Template {
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Substitutes every placeholder with the argument at its index.
    /// Placeholders without a matching argument are kept as written.
    pub fn format(&self, args: &[String]) -> String {
        PLACEHOLDER_REGEX
            .replace_all(&self.pattern, |caps: &Captures| {
                caps["index"]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned()
    }
}

impl From<&str> for Template {
    fn from(pattern: &str) -> Self {
        Template::new(pattern)
    }
}

impl From<String> for Template {
    fn from(pattern: String) -> Self {
        Template::new(pattern)
    }
}

/// Positional call arguments of a wrapped step or attachment.
pub trait Arguments {
    fn to_strings(&self) -> Vec<String>;
}

impl Arguments for () {
    fn to_strings(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! tuple_arguments {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Display),+> Arguments for ($($name,)+) {
            fn to_strings(&self) -> Vec<String> {
                vec![$(self.$index.to_string()),+]
            }
        }
    };
}

tuple_arguments!(A: 0);
tuple_arguments!(A: 0, B: 1);
tuple_arguments!(A: 0, B: 1, C: 2);
tuple_arguments!(A: 0, B: 1, C: 2, D: 3);
tuple_arguments!(A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_arguments!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
