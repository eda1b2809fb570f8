//! Propriedades gerais do tokenizador, do etiquetador e da busca.

use kwic_core::rule_based::pos_tag;
use kwic_core::tokenizer::tokenize;
use kwic_core::{search, Concordancer, RankMode, SearchMode, SearchSpec};
use proptest::prelude::*;

fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn test_tokens_rebuild_non_whitespace_content(text in ".{0,200}") {
        let tokens = tokenize(&text);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(joined, non_whitespace(&text));
    }

    #[test]
    fn test_no_empty_tokens_and_offsets_match(text in ".{0,200}") {
        for (i, token) in tokenize(&text).iter().enumerate() {
            prop_assert!(!token.text.is_empty());
            prop_assert_eq!(token.index, i);
            prop_assert_eq!(&text[token.start..token.end], token.text.as_str());
        }
    }

    #[test]
    fn test_every_token_gets_exactly_one_tag(text in "[a-zA-Z0-9 .,;:!?()'\"-]{0,120}") {
        let tokens = tokenize(&text);
        let tagged = pos_tag(&tokens);
        prop_assert_eq!(tagged.len(), tokens.len());
    }

    #[test]
    fn test_results_respect_window_and_bounds(
        words in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "."]), 0..40),
        window in 0usize..6,
    ) {
        let text = words.join(" ");
        let total = tokenize(&text).len();
        let results = search(&text, "a", "word", "frequency", window).unwrap();
        for r in &results {
            prop_assert!(r.start < r.end && r.end <= total);
            prop_assert!(r.left.len() <= window && r.right.len() <= window);
            prop_assert_eq!(r.pos_tags.len(), r.end - r.start);
        }
    }

    #[test]
    fn test_search_is_deterministic(text in "[a-c .]{0,80}", window in 0usize..4) {
        let concordancer = Concordancer::new();
        let spec = SearchSpec::new(SearchMode::Pos, "NN", window);
        let first = concordancer.search(&text, &spec, RankMode::LeftSort);
        let second = concordancer.search(&text, &spec, RankMode::LeftSort);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_position_rank_sorts_by_start(text in "[a-c .]{0,80}") {
        let results = search(&text, "b", "word", "position", 2).unwrap();
        let starts: Vec<usize> = results.iter().map(|r| r.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        prop_assert_eq!(starts, sorted);
    }
}
