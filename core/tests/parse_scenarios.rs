//! End-to-end parse scenarios against realistic grammars.

use argtree_core::validation::{EnumValidator, NumberValidator};
use argtree_core::{
    Argument, Command, Flag, Group, ParseError, Parser, PropertyOption, Switch, Value,
};

fn build_grammar() -> Group {
    Group::new("options")
        .with_option(Flag::new(Some("-h"), Some("--help")).with_description("show usage"))
        .with_option(Flag::new(Some("-v"), Some("--verbose")))
        .with_option(
            Flag::new(Some("-f"), Some("--file")).with_argument(
                Argument::new("path")
                    .with_minimum(1)
                    .with_maximum(1)
                    .with_initial_separator('='),
            ),
        )
        .with_option(PropertyOption::new())
        .with_option(Switch::new("display").with_default(false))
        .with_option(Argument::new("targets"))
}

#[test]
fn test_burst_expands_combined_short_forms() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar).parse(["-hv"]).unwrap();
    assert!(line.has_option("--help"));
    assert!(line.has_option("--verbose"));
}

#[test]
fn test_burst_with_attached_argument_value() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar).parse(["-fnotes.txt"]).unwrap();
    assert_eq!(
        line.value("--file").unwrap().unwrap().to_string(),
        "notes.txt"
    );
}

#[test]
fn test_initial_separator_attaches_a_value() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar).parse(["--file=notes.txt"]).unwrap();
    assert_eq!(line.values("-f"), &[Value::from("notes.txt")]);
}

#[test]
fn test_attached_value_may_start_with_a_dash() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar).parse(["-f=-x"]).unwrap();
    assert_eq!(line.values("-f"), &[Value::from("-x")]);
}

#[test]
fn test_anonymous_argument_absorbs_plain_tokens() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar)
        .parse(["clean", "-v", "build"])
        .unwrap();
    assert!(line.has_option("-v"));
    assert_eq!(
        line.values("targets"),
        &[Value::from("clean"), Value::from("build")]
    );
}

#[test]
fn test_consume_remaining_takes_option_looking_tokens() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar)
        .parse(["-v", "--", "--not-an-option", "-x"])
        .unwrap();
    assert_eq!(
        line.values("targets"),
        &[Value::from("--not-an-option"), Value::from("-x")]
    );
}

#[test]
fn test_unexpected_token_is_reported_with_the_group() {
    let grammar = build_grammar();
    let error = Parser::new(&grammar).parse(["--bogus"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::UnexpectedToken {
            option: "options".to_string(),
            token: "--bogus".to_string(),
        }
    );
}

#[test]
fn test_switch_states_and_duplicate_rejection() {
    let grammar = build_grammar();

    let line = Parser::new(&grammar).parse(["+display"]).unwrap();
    assert_eq!(line.switch("+display"), Some(true));

    let line = Parser::new(&grammar).parse(["-display"]).unwrap();
    assert_eq!(line.switch("+display"), Some(false));

    let error = Parser::new(&grammar)
        .parse(["+display", "-display"])
        .unwrap_err();
    assert_eq!(
        error,
        ParseError::DuplicateSwitch {
            option: "+display".to_string(),
        }
    );
}

#[test]
fn test_switch_default_applies_when_never_set() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar).parse(Vec::<String>::new()).unwrap();
    assert_eq!(line.switch("+display"), Some(false));
    assert!(!line.has_option("+display"));
}

#[test]
fn test_properties_accumulate_with_last_definition_winning() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar)
        .parse(["-Dcolor=red", "-Dverbose", "-Dcolor=blue"])
        .unwrap();
    assert_eq!(line.property("color"), Some("blue"));
    assert_eq!(line.property("verbose"), Some("true"));
    assert_eq!(line.properties().len(), 2);
}

#[test]
fn test_bare_property_trigger_is_an_unexpected_token() {
    let grammar = build_grammar();
    let error = Parser::new(&grammar).parse(["-D"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::UnexpectedToken {
            option: "-D".to_string(),
            token: "-D".to_string(),
        }
    );
}

#[test]
fn test_subsequent_separator_splits_with_truncation() {
    let grammar = Group::new("options").with_option(
        Flag::new(Some("-g"), None).with_argument(
            Argument::new("pieces")
                .with_maximum(3)
                .with_subsequent_separator(':'),
        ),
    );
    let line = Parser::new(&grammar).parse(["-g", "a:b:c:d"]).unwrap();
    assert_eq!(
        line.values("-g"),
        &[Value::from("a"), Value::from("b"), Value::from("c:d")]
    );
}

#[test]
fn test_separator_pieces_and_plain_tokens_share_the_maximum() {
    let grammar = Group::new("options").with_option(
        Flag::new(Some("-g"), None).with_argument(
            Argument::new("pieces")
                .with_maximum(3)
                .with_subsequent_separator(','),
        ),
    );
    let line = Parser::new(&grammar).parse(["-g", "a,b", "c"]).unwrap();
    assert_eq!(
        line.values("-g"),
        &[Value::from("a"), Value::from("b"), Value::from("c")]
    );
}

#[test]
fn test_variadic_argument_binds_all_plain_tokens() {
    let grammar = Group::new("options").with_option(
        Flag::new(Some("-g"), None)
            .with_argument(Argument::new("numbers").with_minimum(1).with_maximum(5)),
    );
    let line = Parser::new(&grammar).parse(["-g", "1", "2", "3"]).unwrap();
    assert_eq!(
        line.values("-g"),
        &[Value::from("1"), Value::from("2"), Value::from("3")]
    );

    let error = Parser::new(&grammar).parse(["-g"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::MissingValue {
            option: "-g".to_string(),
        }
    );
}

#[test]
fn test_argument_cardinality_is_validated() {
    let grammar = Group::new("options").with_option(
        Flag::new(Some("-n"), None)
            .with_argument(Argument::new("count").with_minimum(1).with_maximum(1)),
    );
    let error = Parser::new(&grammar).parse(["-n"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::MissingValue {
            option: "-n".to_string(),
        }
    );
}

#[test]
fn test_too_many_values_fail_validation_naming_the_surplus() {
    let grammar = Group::new("options").with_option(
        Flag::new(Some("-g"), None).with_argument(Argument::new("values").with_maximum(3)),
    );
    // consume-remaining binds past the maximum; validation catches it
    let error = Parser::new(&grammar)
        .parse(["-g", "--", "a", "b", "c", "d"])
        .unwrap_err();
    assert_eq!(
        error,
        ParseError::UnexpectedValue {
            option: "-g".to_string(),
            value: "d".to_string(),
        }
    );
}

#[test]
fn test_required_flag_must_be_present() {
    let grammar = Group::new("options")
        .with_option(Flag::new(Some("-v"), None))
        .with_option(Flag::new(None, Some("--out")).required());

    let error = Parser::new(&grammar).parse(["-v"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::MissingOption {
            option: "--out".to_string(),
            choices: Vec::new(),
        }
    );
}

#[test]
fn test_exclusive_group_enforces_cardinality() {
    let action = Group::new("action")
        .with_minimum(1)
        .with_maximum(1)
        .with_option(Flag::new(None, Some("--start")))
        .with_option(Flag::new(None, Some("--stop")));
    let grammar = Group::new("options").with_option(action);

    let line = Parser::new(&grammar).parse(["--stop"]).unwrap();
    assert!(line.has_option("--stop"));

    let error = Parser::new(&grammar).parse(Vec::<String>::new()).unwrap_err();
    assert_eq!(
        error,
        ParseError::MissingOption {
            option: "action".to_string(),
            choices: vec!["--start".to_string(), "--stop".to_string()],
        }
    );

    let error = Parser::new(&grammar)
        .parse(["--start", "--stop"])
        .unwrap_err();
    assert_eq!(
        error,
        ParseError::TooManyOptions {
            group: "action".to_string(),
            option: "--stop".to_string(),
        }
    );
}

#[test]
fn test_command_scopes_its_own_children() {
    let grammar = Group::new("commands").with_option(
        Command::new("commit")
            .with_argument(Argument::new("message").with_minimum(1).with_maximum(1))
            .with_children(
                Group::new("commit options").with_option(Flag::new(None, Some("--amend"))),
            ),
    );

    let line = Parser::new(&grammar)
        .parse(["commit", "fix typo", "--amend"])
        .unwrap();
    assert!(line.has_option("commit"));
    assert!(line.has_option("--amend"));
    assert_eq!(line.value("commit").unwrap().unwrap().to_string(), "fix typo");
}

#[test]
fn test_validators_convert_values_in_place() {
    let grammar = Group::new("options").with_option(
        Flag::new(None, Some("--port")).with_argument(
            Argument::new("port")
                .with_minimum(1)
                .with_maximum(1)
                .with_validator(NumberValidator::integer().with_minimum(1.0)),
        ),
    );

    let line = Parser::new(&grammar).parse(["--port", "8080"]).unwrap();
    assert_eq!(line.values("--port"), &[Value::Int(8080)]);

    let error = Parser::new(&grammar).parse(["--port", "zero"]).unwrap_err();
    assert_eq!(
        error,
        ParseError::InvalidValue {
            option: "--port".to_string(),
            value: "zero".to_string(),
            detail: "not an integer".to_string(),
        }
    );
}

#[test]
fn test_defaults_apply_and_yield_to_real_values() {
    let grammar = Group::new("options").with_option(
        Flag::new(None, Some("--format")).with_argument(
            Argument::new("format")
                .with_maximum(1)
                .with_defaults(["json"])
                .with_validator(EnumValidator::new(["json", "yaml"])),
        ),
    );

    let line = Parser::new(&grammar).parse(Vec::<String>::new()).unwrap();
    assert_eq!(line.values("--format"), &[Value::from("json")]);

    let line = Parser::new(&grammar).parse(["--format", "yaml"]).unwrap();
    assert_eq!(line.values("--format"), &[Value::from("yaml")]);
}

#[test]
fn test_repeated_flags_are_counted() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar).parse(["-v", "-v", "-v"]).unwrap();
    assert_eq!(line.option_count("-v"), 3);
    assert_eq!(line.options().len(), 3);
}

#[test]
fn test_summary_snapshot_serializes() {
    let grammar = build_grammar();
    let line = Parser::new(&grammar)
        .parse(["-v", "--file", "notes.txt", "+display", "-Dcolor=red"])
        .unwrap();
    let summary = line.summary();

    assert_eq!(
        summary.options,
        vec!["--verbose", "--file", "+display"]
    );
    assert_eq!(
        summary.values.get("--file"),
        Some(&vec!["notes.txt".to_string()])
    );
    assert_eq!(summary.switches.get("+display"), Some(&true));
    assert_eq!(summary.properties.get("color"), Some(&"red".to_string()));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["values"]["--file"][0], "notes.txt");
}

#[test]
fn test_summary_rebuilds_an_equivalent_token_stream() {
    let grammar = build_grammar();
    let parser = Parser::new(&grammar);
    let first = parser
        .parse(["-v", "--file", "notes.txt", "+display", "-Dcolor=red"])
        .unwrap()
        .summary();

    // canonical re-serialization: preferred names, attached values, switch
    // states, property definitions
    let mut tokens = Vec::new();
    for name in &first.options {
        if let Some(state) = first.switches.get(name) {
            tokens.push(if *state {
                name.clone()
            } else {
                name.replacen('+', "-", 1)
            });
        } else {
            tokens.push(name.clone());
            if let Some(values) = first.values.get(name) {
                tokens.extend(values.iter().cloned());
            }
        }
    }
    for (key, value) in &first.properties {
        tokens.push(format!("-D{key}={value}"));
    }

    let second = parser.parse(tokens).unwrap().summary();
    assert_eq!(second, first);
}

#[test]
fn test_one_grammar_backs_many_parses() {
    let grammar = build_grammar();
    let parser = Parser::new(&grammar);
    for _ in 0..3 {
        let line = parser.parse(["-v"]).unwrap();
        assert!(line.has_option("-v"));
        assert!(!line.has_option("--file"));
    }
}
