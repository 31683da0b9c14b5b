use rand::distributions::Alphanumeric;
use rand::Rng;

const CODE_LEN: usize = 10;

/// Generate a human-readable code such as `REQ-7F3K9QX2BM`
pub fn generate_code(prefix: &str) -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(char::from)
        .collect();

    format!("{}-{}", prefix, token.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_code("REQ");
        assert!(code.starts_with("REQ-"));
        assert_eq!(code.len(), 4 + CODE_LEN);
        assert!(code[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_codes_differ() {
        let a = generate_code("PKG");
        let b = generate_code("PKG");
        assert_ne!(a, b);
    }
}
