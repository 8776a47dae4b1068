use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KinetypeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(KinetypeError::font("x").to_string().contains("font error:"));
    assert!(
        KinetypeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        KinetypeError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KinetypeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
