#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Create,
    Edit,
    States,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "create" => CliVerb::Create,
        "edit" => CliVerb::Edit,
        "states" => CliVerb::States,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  create <draft.yaml>                  Create a configuration from a wizard draft"
            .to_string(),
        "  edit <name> <draft.yaml>             Apply a draft to an existing configuration"
            .to_string(),
        "  states <draft.yaml>                  Print the workflow states seeded from Jira"
            .to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_verbs() {
        assert_eq!(parse_cli_verb("create"), CliVerb::Create);
        assert_eq!(parse_cli_verb("edit"), CliVerb::Edit);
        assert_eq!(parse_cli_verb("states"), CliVerb::States);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("setup"), CliVerb::Unknown);
    }

    #[test]
    fn help_lists_every_verb() {
        let help = help_text();
        for verb in ["create", "edit", "states", "help"] {
            assert!(help.contains(&format!("  {verb}")), "missing {verb}");
        }
    }
}
