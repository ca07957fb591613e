use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlourishError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FlourishError::config("x").to_string().contains("config error:"));
    assert!(FlourishError::render("x").to_string().contains("render error:"));
    assert!(
        FlourishError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlourishError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
