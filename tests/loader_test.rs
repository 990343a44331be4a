use std::{io::Write, path::PathBuf};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use segdict::{
    config::LoaderConfig,
    dictionary::{
        dict_path, load_dictionary, DictLoader, DictionaryError, DictionaryLoader,
        FrequencyError, TokenStream,
    },
    MemoryDictionary, Token,
};
use tempfile::NamedTempFile;
use tokio_stream::StreamExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

const LOOSE_PATTERN: &str = r"^(.+?)(?: +([0-9][0-9a-z]*))?(?: +([a-z]+))?$";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn dictionary_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Consumer that records tokens and whether the single-token path was used.
#[derive(Default)]
struct RecordingLoader {
    streamed: Vec<Token>,
    added: Vec<Token>,
}

#[async_trait::async_trait]
impl DictLoader for RecordingLoader {
    async fn load(&mut self, mut tokens: TokenStream) {
        while let Some(token) = tokens.next().await {
            self.streamed.push(token);
        }
    }

    fn add_token(&mut self, token: Token) {
        self.added.push(token);
    }
}

#[tokio::test]
async fn test_load_fixture() {
    let mut dictionary = MemoryDictionary::new();
    let summary = load_dictionary(&mut dictionary, fixture("dict.txt"))
        .await
        .unwrap();

    assert_eq!(summary.lines_read, 8);
    assert_eq!(
        dictionary.tokens(),
        &[
            Token::new("一二三", 3.0, "m"),
            Token::new("AT&T", 3.0, "nz"),
            Token::new("B超", 3.0, "n"),
            Token::new("c语言", 3.0, ""),
            Token::new("doctor", 0.0, ""),
            Token::new("中国", 3001.0, "ns"),
        ]
    );
    assert_eq!(dictionary.total_frequency(), 3013.0);
}

#[tokio::test]
async fn test_bom_never_reaches_text() {
    let mut dictionary = MemoryDictionary::new();
    load_dictionary(&mut dictionary, fixture("dict.txt"))
        .await
        .unwrap();
    assert!(dictionary
        .tokens()
        .iter()
        .all(|token| !token.text().contains('\u{feff}')));
    assert!(dictionary.get("一二三").is_some());
}

#[tokio::test]
async fn test_two_loads_yield_the_same_sequence() {
    let mut first = MemoryDictionary::new();
    let mut second = MemoryDictionary::new();
    load_dictionary(&mut first, fixture("dict.txt")).await.unwrap();
    load_dictionary(&mut second, fixture("dict.txt")).await.unwrap();
    assert_eq!(first.tokens(), second.tokens());
}

#[tokio::test]
async fn test_relative_name_is_resolved_against_cwd() {
    let cwd = std::env::current_dir().unwrap();
    let absolute = fixture("dict.txt");
    let relative = relative_to(&absolute, &cwd);

    assert_eq!(dict_path(&relative).unwrap(), absolute);
    let mut dictionary = MemoryDictionary::new();
    load_dictionary(&mut dictionary, &relative).await.unwrap();
    assert_eq!(dictionary.len(), 6);
}

// cargo runs integration tests from the manifest directory
fn relative_to(path: &std::path::Path, base: &std::path::Path) -> PathBuf {
    path.strip_prefix(base)
        .map(|p| PathBuf::from(".").join(p))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[tokio::test]
async fn test_missing_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = RecordingLoader::default();

    let error = load_dictionary(&mut loader, dir.path().join("nope.txt"))
        .await
        .unwrap_err();
    assert!(matches!(error, DictionaryError::ResourceOpen { .. }));
    assert!(loader.streamed.is_empty());
}

#[tokio::test]
async fn test_facade_uses_bulk_path_only() {
    let file = dictionary_file("apple 120 n\nbanana 50\ncherry\n");
    let mut loader = RecordingLoader::default();
    load_dictionary(&mut loader, file.path()).await.unwrap();

    assert_eq!(loader.streamed.len(), 3);
    assert!(loader.added.is_empty());
}

#[tokio::test]
async fn test_malformed_line_in_large_dictionary() {
    let mut contents = String::new();
    for i in 1..=10_000 {
        if i == 5_000 {
            contents.push_str("broken 12x n\n");
        } else {
            contents.push_str(&format!("word{i} {i} n\n"));
        }
    }
    let file = dictionary_file(&contents);
    let config = LoaderConfig {
        grammar_pattern: Some(LOOSE_PATTERN.to_string()),
        token_buffer_size: 16,
    };
    let loader = DictionaryLoader::new(&config).unwrap();
    let mut dictionary = MemoryDictionary::new();

    let error = loader.load(&mut dictionary, file.path()).await.unwrap_err();

    assert_eq!(dictionary.len(), 4_999);
    assert_eq!(dictionary.tokens().last(), Some(&Token::new("word4999", 4999.0, "n")));
    assert_eq!(error.line_number(), Some(5_000));
    assert_eq!(error.line(), Some("broken 12x n"));
    assert!(error.to_string().contains("broken 12x n"));
}

#[tokio::test]
async fn test_overflowing_frequency_ends_default_load() {
    let huge = "9".repeat(400);
    let file = dictionary_file(&format!("apple 1 n\nbanana 2\npear {huge} n\nplum 4\n"));
    let mut dictionary = MemoryDictionary::new();

    let error = load_dictionary(&mut dictionary, file.path())
        .await
        .unwrap_err();

    assert_eq!(
        dictionary.tokens(),
        &[Token::new("apple", 1.0, "n"), Token::new("banana", 2.0, "")]
    );
    assert!(dictionary.total_frequency().is_finite());
    match error {
        DictionaryError::MalformedLine {
            line_number,
            line,
            source,
        } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, format!("pear {huge} n"));
            assert_eq!(source, FrequencyError::OutOfRange);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_parallel_loads_are_independent() {
    let file = dictionary_file("a 1\nb 2\nc 3\n");
    let path = file.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let path = path.clone();
            tokio::spawn(async move {
                let mut dictionary = MemoryDictionary::new();
                load_dictionary(&mut dictionary, path).await.unwrap();
                dictionary.tokens().to_vec()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.await.unwrap(),
            vec![
                Token::new("a", 1.0, ""),
                Token::new("b", 2.0, ""),
                Token::new("c", 3.0, ""),
            ]
        );
    }
}

#[derive(Debug, Clone)]
enum Line {
    Entry(Token),
    Blank(String),
}

fn line_strategy() -> impl Strategy<Value = Line> {
    prop_oneof![
        ("[A-Z][a-z]{0,5}", proptest::option::of(0u32..100_000), "[a-z]{1,3}").prop_map(
            |(text, frequency, pos)| match frequency {
                Some(frequency) => Line::Entry(Token::new(text, f64::from(frequency), pos)),
                None => Line::Entry(Token::new(text, 0.0, "")),
            }
        ),
        "[ \t]{0,4}".prop_map(Line::Blank),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_order_is_preserved(lines in proptest::collection::vec(line_strategy(), 0..40)) {
        let mut contents = String::new();
        let mut expected = Vec::new();
        for line in &lines {
            match line {
                Line::Entry(token) if token.frequency() == 0.0 && token.pos().is_empty() => {
                    contents.push_str(&format!("{}\n", token.text()));
                    expected.push(token.clone());
                }
                Line::Entry(token) => {
                    contents.push_str(&format!(
                        "{} {} {}\n",
                        token.text(),
                        token.frequency(),
                        token.pos()
                    ));
                    expected.push(token.clone());
                }
                Line::Blank(blank) => contents.push_str(&format!("{blank}\n")),
            }
        }

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let tokens = runtime.block_on(async move {
            let mut dictionary = MemoryDictionary::new();
            DictionaryLoader::default()
                .load_from_reader(&mut dictionary, std::io::Cursor::new(contents.into_bytes()))
                .await
                .unwrap();
            dictionary.tokens().to_vec()
        });
        prop_assert_eq!(tokens, expected);
    }
}
