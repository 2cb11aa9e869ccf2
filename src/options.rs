use std::collections::HashMap;

/// Declaration of a single CLI option: its user-facing token and
/// whether it takes a value and/or may be repeated.
#[derive(Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    pub option: &'static str,
    pub is_boolean: bool,
    pub is_multiple: bool,
}

const fn spec(
    name: &'static str,
    option: &'static str,
    is_boolean: bool,
    is_multiple: bool,
) -> OptionSpec {
    OptionSpec {
        name,
        option,
        is_boolean,
        is_multiple,
    }
}

lazy_static! {
    pub static ref OPTION_SCHEMA: Vec<OptionSpec> = vec![
        spec("help", "help", true, false),
        spec("countries", "country", false, true),
        spec("protocols", "protocol", false, true),
        spec("countrycodes", "countrycode", false, true),
        spec("ipv4", "ipv4", true, false),
        spec("ipv6", "ipv6", true, false),
        spec("lastsync", "lastsync", false, false),
        spec("output", "output", false, false),
        spec("sorts", "sortby", false, true),
        spec("active", "active", true, false),
        spec("timeout", "timeout", false, false),
    ];
}

/// Value shape of a supplied option, resolved against the schema at
/// parse time. Absent options simply have no entry.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag,
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Default)]
pub struct ParsedOptions {
    values: HashMap<&'static str, OptionValue>,
    pub unknown: Vec<String>,
    pub lone: Vec<String>,
}

impl ParsedOptions {
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Flag))
    }

    pub fn single(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn multiple(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(OptionValue::Multiple(values)) => values,
            _ => &[],
        }
    }
}

/// Parses raw argument tokens against the schema. Options are bare
/// words ("country france country spain"); a value-taking option
/// consumes the following token. Dash-prefixed tokens matching nothing
/// are collected as unknown, any other stray token as lone.
pub fn parse_args<I>(args: I) -> ParsedOptions
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = ParsedOptions::default();
    let mut tokens = args.into_iter();

    while let Some(token) = tokens.next() {
        match OPTION_SCHEMA.iter().find(|spec| spec.option == token) {
            Some(spec) if spec.is_boolean => {
                parsed.values.insert(spec.name, OptionValue::Flag);
            }
            Some(spec) => match tokens.next() {
                Some(value) if spec.is_multiple => {
                    let entry = parsed
                        .values
                        .entry(spec.name)
                        .or_insert_with(|| OptionValue::Multiple(Vec::new()));
                    if let OptionValue::Multiple(values) = entry {
                        values.push(value);
                    }
                }
                Some(value) => {
                    parsed.values.insert(spec.name, OptionValue::Single(value));
                }
                // value-taking option at the end of the line has
                // nothing to consume
                None => parsed.lone.push(token),
            },
            None if token.starts_with('-') => parsed.unknown.push(token),
            None => parsed.lone.push(token),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::parse_args;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn help_parses_as_a_flag() {
        let parsed = parse_args(args(&["help"]));
        assert!(parsed.flag("help"));
    }

    #[test]
    fn boolean_options_become_flags() {
        let parsed = parse_args(args(&["ipv4", "active"]));
        assert!(parsed.flag("ipv4"));
        assert!(parsed.flag("active"));
        assert!(!parsed.flag("ipv6"));
    }

    #[test]
    fn repeatable_options_collect_in_order() {
        let parsed = parse_args(args(&["country", "France", "country", "Spain"]));
        assert_eq!(parsed.multiple("countries"), ["France", "Spain"]);
    }

    #[test]
    fn single_option_keeps_last_value() {
        let parsed = parse_args(args(&["output", "a.txt", "output", "b.txt"]));
        assert_eq!(parsed.single("output"), Some("b.txt"));
    }

    #[test]
    fn flag_accessor_ignores_value_options() {
        let parsed = parse_args(args(&["lastsync", "2024-01-01"]));
        assert!(!parsed.flag("lastsync"));
        assert_eq!(parsed.single("lastsync"), Some("2024-01-01"));
    }

    #[test]
    fn dashed_tokens_are_unknown() {
        let parsed = parse_args(args(&["--country", "france"]));
        assert_eq!(parsed.unknown, ["--country"]);
        assert_eq!(parsed.lone, ["france"]);
    }

    #[test]
    fn stray_words_are_lone() {
        let parsed = parse_args(args(&["ipv4", "france"]));
        assert_eq!(parsed.lone, ["france"]);
        assert!(parsed.unknown.is_empty());
    }

    #[test]
    fn trailing_value_option_is_lone() {
        let parsed = parse_args(args(&["country"]));
        assert_eq!(parsed.lone, ["country"]);
        assert!(parsed.multiple("countries").is_empty());
    }

    #[test]
    fn empty_args_parse_to_nothing() {
        let parsed = parse_args(args(&[]));
        assert!(parsed.unknown.is_empty());
        assert!(parsed.lone.is_empty());
        assert!(!parsed.flag("help"));
    }
}
