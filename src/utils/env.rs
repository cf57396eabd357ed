/// Identity used when this tool announces itself over the wire:
/// the `User-Agent` header on outbound probes and
/// the `Server` header on mock responses.
pub fn project_name() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_is_a_valid_header_value() {
        let name = project_name();
        assert!(name.starts_with("postbench/"));
        assert!(name.is_ascii());
        assert!(!name.contains(char::is_whitespace));
    }
}
