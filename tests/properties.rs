use proptest::prelude::*;
use taebaek::config::{Config, KeywordPolicy};
use taebaek::extension::NoExtensions;
use taebaek::interpreter::{interpret, Context};
use taebaek::lexer::{Lexer, Token};

fn run<S: AsRef<[u8]> + ?Sized>(input: &S, config: &Config) -> Context {
    let mut context = Context::new();
    let _ = interpret(input, config, &mut context, &mut NoExtensions);
    context
}

proptest! {
    /// Text without operators, whitespace or keyword letters comes out verbatim.
    #[test]
    fn literal_text_is_copied_verbatim(s in "[A-Za-dg-hj-z0-9.,!?()]{0,64}") {
        let context = run(&s, &Config::default());

        prop_assert!(context.diagnostics.is_empty());
        prop_assert_eq!(context.output.as_bytes(), s.as_bytes());
    }

    /// Whitespace separates tokens but is never emitted.
    #[test]
    fn whitespace_is_dropped(words in prop::collection::vec("[A-Z0-9]{1,8}", 0..8)) {
        let context = run(&words.join(" \n\t"), &Config::default());

        let expected = words.concat();
        prop_assert_eq!(context.output.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn declare_assign_add(a in 0i32..100_000, b in 0i32..100_000) {
        let context = run(&format!("&x :x {} +x {}", a, b), &Config::default());

        prop_assert_eq!(context.env.get("x"), Some(a + b));
        prop_assert!(context.output.is_empty());
    }

    #[test]
    fn loops_repeat_their_body(n in 1i32..50) {
        let context = run(&format!("&x for x : 1 {} Ab", n), &Config::default());

        prop_assert_eq!(context.output.len(), 2 * n as usize);
        prop_assert_eq!(context.env.get("x"), Some(n));
    }

    /// Keywords win over text whenever their full spelling is present.
    #[test]
    fn import_is_one_token(suffix in "[A-Z0-9]{0,8}") {
        let tokens = Lexer::new(&format!("import{}", suffix))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        prop_assert_eq!(&tokens[0], &Token::Import);
        prop_assert!(!tokens.contains(&Token::If));
    }

    /// Outside the operator set and keyword letters, every byte is literal text.
    #[test]
    fn arbitrary_bytes_are_copied_verbatim(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let bytes: Vec<u8> = bytes
            .into_iter()
            .filter(|byte| !b"&:+-*/%eif \t\n\r\x0B\x0C".contains(byte))
            .collect();
        let context = run(&bytes, &Config::default());

        prop_assert!(context.diagnostics.is_empty());
        prop_assert_eq!(context.output.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn interpreter_does_not_panic(s in "\\PC{0,64}", strict in any::<bool>()) {
        let config = Config {
            keywords: if strict { KeywordPolicy::Strict } else { KeywordPolicy::Lenient },
            max_iterations: 1_000,
            ..Config::default()
        };

        run(&s, &config);
    }
}
