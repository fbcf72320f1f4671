use std::borrow::Cow;

#[tplat_derive::tplat_error]
pub enum OverlayError {
    #[error("Overlay I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Record '{key}' not found{}", format_context(.context))]
    Missing { key: String, context: Option<Cow<'static, str>> },

    #[error("Internal overlay error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<Vec<u8>, OverlayError> {
    std::fs::read("/definitely/not/here.bin").context("Reading overlay record")
}

fn lookup(key: &str) -> Result<(), OverlayError> {
    Err(OverlayError::Missing { key: key.to_owned(), context: None })
}

fn main() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, OverlayError::Io { context: Some(_), .. }));
    assert!(err.to_string().contains("(Reading overlay record)"));

    let err = lookup("cap-5.8").context("Resolving platform").unwrap_err();
    assert_eq!(err.to_string(), "Record 'cap-5.8' not found (Resolving platform)");

    let err: OverlayError = "broken".into();
    assert_eq!(err.to_string(), "Internal overlay error: broken");

    let err: OverlayError = String::from("owned").into();
    assert!(matches!(err, OverlayError::Internal { context: None, .. }));

    let io = std::io::Error::other("disk");
    let err: OverlayError = io.into();
    assert!(matches!(err, OverlayError::Io { context: None, .. }));
}
