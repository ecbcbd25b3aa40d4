//! Library integration tests.

use scriptorium::ScriptoriumError;

#[test]
fn error_types_are_public() {
    let err = ScriptoriumError::TemplateNotInstalled {
        name: "ieee".into(),
    };
    assert!(err.to_string().contains("ieee"));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> scriptorium::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use scriptorium::cli::{Cli, Commands};

    let cli = Cli::parse_from(["scriptorium", "info", "drafts/paper", "-t"]);

    if let Commands::Info(args) = cli.command {
        assert!(args.template);
        assert_eq!(args.paper, std::path::PathBuf::from("drafts/paper"));
    } else {
        panic!("Expected Info command");
    }
}

#[test]
fn exit_codes_are_distinct_per_failure_kind() {
    use std::path::PathBuf;

    let cases = [
        (
            ScriptoriumError::NoRootDocument {
                path: PathBuf::from("p"),
            },
            1,
        ),
        (
            ScriptoriumError::NoTemplateMetadata {
                path: PathBuf::from("p"),
            },
            2,
        ),
        (
            ScriptoriumError::DestinationExists {
                path: PathBuf::from("p"),
            },
            5,
        ),
        (
            ScriptoriumError::ToolTimedOut {
                tool: "pdflatex".into(),
                seconds: 1,
                diagnostic: String::new(),
            },
            6,
        ),
        (
            ScriptoriumError::NotADirectory {
                path: PathBuf::from("p"),
            },
            7,
        ),
    ];

    for (err, code) in cases {
        assert_eq!(err.exit_code(), code, "{}", err);
    }
}

#[test]
fn mock_ui_is_public() {
    use scriptorium::ui::{MockUI, UserInterface};

    let mut ui = MockUI::new();
    ui.output("paper.mmd");
    assert!(ui.has_output("paper"));
}
