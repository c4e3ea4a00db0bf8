//! Error messages and stable codes.

use affinity_core::errors::{ConfigError, ExportError, ModelError, UnknownTagError};
use affinity_core::{AffinityErrorCode, DeclarationId, ThreadTag};

#[test]
fn every_error_family_has_its_code() {
    assert_eq!(ModelError::EmptyLocation(DeclarationId(3)).error_code(), "MODEL_ERROR");
    assert_eq!(ConfigError::EmptyLibraryPath.error_code(), "CONFIG_ERROR");
    assert_eq!(UnknownTagError("FX".into()).error_code(), "UNKNOWN_TAG");
    assert_eq!(
        ExportError::Locked { path: "t".into() }.error_code(),
        "EXPORT_LOCKED"
    );
    assert_eq!(ExportError::NotUtf8.error_code(), "EXPORT_MALFORMED");
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert_eq!(ExportError::from(io).error_code(), "EXPORT_IO_ERROR");
}

#[test]
fn model_error_messages_name_the_declaration() {
    let err = ModelError::WrongEndpointKind {
        edge: "call",
        id: DeclarationId(7),
        kind: "field",
        expected: "method, constructor or initializer",
    };
    assert_eq!(
        err.to_string(),
        "call edge endpoint #7 is a field, expected method, constructor or initializer"
    );
    assert_eq!(
        ModelError::DuplicateDeclaration(DeclarationId(2)).to_string(),
        "duplicate declaration id #2"
    );
    assert_eq!(
        ModelError::UnexportableLocation {
            id: DeclarationId(4),
            location: "app ".into(),
        }
        .to_string(),
        "declaration #4 location \"app \" has trailing whitespace or control characters"
    );
}

#[test]
fn unknown_tag_comes_from_parsing() {
    let err = "Swing".parse::<ThreadTag>().unwrap_err();
    assert_eq!(err.to_string(), "unknown thread tag: Swing");
}
