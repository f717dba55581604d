//! Short code generation and validation utilities.
//!
//! A code is valid iff it matches `^[A-Za-z0-9]{6,8}$`. Generated codes are
//! always [`GENERATED_CODE_LENGTH`] characters, each drawn independently and
//! uniformly from the 62-symbol [`ALPHABET`].

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of randomly generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Shortest code accepted from callers.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest code accepted from callers.
pub const MAX_CODE_LENGTH: usize = 8;

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[A-Za-z0-9]{{{MIN_CODE_LENGTH},{MAX_CODE_LENGTH}}}$"))
        .expect("static code pattern is valid")
});

/// Returns true if `code` satisfies the short code syntax.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_code("Ab3dEf"));
/// assert!(is_valid_code("Ab3dEf12"));
/// assert!(!is_valid_code("ab"));
/// assert!(!is_valid_code("Ab3dEf123"));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Source of candidate short codes.
///
/// Injected into [`crate::application::services::CodeAllocator`] at
/// construction so the random source is explicit process configuration.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code. Availability is not checked here.
    fn generate(&self) -> String;
}

/// Draws codes from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Generator producing [`GENERATED_CODE_LENGTH`]-character codes.
    pub fn new() -> Self {
        Self {
            length: GENERATED_CODE_LENGTH,
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(&mut rand::rng(), self.length)
    }
}

/// Builds a code of `length` symbols, each uniform over [`ALPHABET`].
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        assert_eq!(ALPHABET.len(), 62);
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = RandomCodeGenerator::new().generate();
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_default_generator_uses_standard_length() {
        let code = RandomCodeGenerator::default().generate();
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generated_codes_are_valid() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..1000 {
            let code = generator.generate();
            assert!(is_valid_code(&code), "generated invalid code {code}");
        }
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let generator = RandomCodeGenerator::new();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 62^6 code space; a collision among 1000 draws is vanishingly unlikely.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_code(&mut StdRng::seed_from_u64(7), 8);
        let b = generate_code(&mut StdRng::seed_from_u64(7), 8);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_symbol_distribution_is_uniform() {
        const SAMPLES: usize = 20_000;

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..SAMPLES {
            let code = generate_code(&mut rng, GENERATED_CODE_LENGTH);
            assert_eq!(code.len(), GENERATED_CODE_LENGTH);
            for c in code.chars() {
                *counts.entry(c).or_default() += 1;
            }
        }

        assert_eq!(counts.len(), 62, "every symbol should appear");

        let total = (SAMPLES * GENERATED_CODE_LENGTH) as f64;
        let expected = total / 62.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        // 61 degrees of freedom: mean 61, 99.99th percentile around 110.
        assert!(chi_square < 120.0, "chi-square too large: {chi_square}");

        let share = |pred: fn(&char) -> bool| {
            counts
                .iter()
                .filter(|(c, _)| pred(*c))
                .map(|(_, n)| *n)
                .sum::<usize>() as f64
                / total
        };

        assert!((share(char::is_ascii_uppercase) - 26.0 / 62.0).abs() < 0.01);
        assert!((share(char::is_ascii_lowercase) - 26.0 / 62.0).abs() < 0.01);
        assert!((share(char::is_ascii_digit) - 10.0 / 62.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_boundaries() {
        assert!(!is_valid_code("ab"));
        assert!(!is_valid_code("Ab3dE"));
        assert!(is_valid_code("Ab3dEf"));
        assert!(is_valid_code("Ab3dEf1"));
        assert!(is_valid_code("Ab3dEf12"));
        assert!(!is_valid_code("Ab3dEf123"));
    }

    #[test]
    fn test_validate_rejects_non_alphanumeric() {
        assert!(!is_valid_code("my-code"));
        assert!(!is_valid_code("my_code1"));
        assert!(!is_valid_code("abc 123"));
        assert!(!is_valid_code("abcdé1"));
        assert!(!is_valid_code("Ab3dEf\n"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(!is_valid_code(""));
    }
}
