//! # Motor de Regras: Cascata de Tags POS
//!
//! O etiquetador é uma lista **ordenada** de regras `(nome, predicado → tag)`.
//! Para cada token as regras são avaliadas de cima para baixo e a primeira que
//! dispara decide a tag. Não é um conjunto de classificadores independentes:
//! a ordem é a semântica.
//!
//! ## Ordem da Cascata
//!
//! 1. Número puro → `CD`
//! 2. Número com sufixo ordinal ("1st", "3rd") → `JJ`
//! 3. `.` `!` `?` → `.`
//! 4. `,` `;` `:` → `,`
//! 5. Parênteses/colchetes/chaves → `-LRB-` / `-RRB-`
//! 6. Aspas → ` `` ` / `''`
//! 7. Listas fechadas (artigos, cópulas, auxiliares, modais, pronomes, ...)
//! 8. Sufixos morfológicos (-ly, -ing, -ed, -er, -est, -s, -tion...)
//! 9. Capitalização fora do início de sentença → `NNP`
//! 10. Palavra alfabética → `NN`
//! 11. Qualquer outra coisa → `SYM`
//!
//! Cada token é decidido olhando apenas para o próprio texto, seu índice e os
//! vizinhos imediatos. Nenhum estado é carregado entre tokens.

use std::sync::LazyLock;

use regex::Regex;

use crate::tagger::{PosTag, TaggedToken};
use crate::tokenizer::Token;

static CARDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("regex de cardinal válida"));
static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(st|nd|rd|th)$").expect("regex de ordinal válida"));

const ARTICLES: &[&str] = &["the", "a", "an"];
const COPULAS: &[&str] = &["is", "are", "was", "were", "be", "being", "been"];
const HAVE_FORMS: &[&str] = &["have", "has", "had"];
const DO_FORMS: &[&str] = &["do", "does", "did"];
const MODALS: &[&str] = &[
    "will", "would", "can", "could", "may", "might", "shall", "should", "must",
];
const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];
const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];
const DEMONSTRATIVES: &[&str] = &["this", "that", "these", "those"];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "yet", "so", "for", "nor"];
const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "to", "from", "of", "about", "into", "through",
    "during", "before", "after", "above", "below", "up", "down", "out", "off", "over", "under",
    "again", "further", "then", "once",
];
const NEGATIONS: &[&str] = &[
    "not", "never", "no", "none", "nobody", "nothing", "nowhere", "neither", "nor",
];
const DEGREE_ADVERBS: &[&str] = &[
    "very", "quite", "rather", "really", "too", "so", "more", "most", "less", "least",
];
/// Palavras que, antes de um "-s", indicam substantivo plural
const PLURAL_CUES: &[&str] = &["the", "these", "those", "many", "few", "several"];
/// Determinantes e possessivos que precedem um substantivo
const NOUN_CUES: &[&str] = &[
    "the", "a", "an", "this", "that", "my", "your", "his", "her", "its", "our", "their",
];
/// Formas verbais conhecidas que seguem um substantivo
const VERB_CUES: &[&str] = &["is", "are", "was", "were", "will", "would"];

/// Tudo o que uma regra pode consultar para decidir a tag de um token.
pub struct TokenContext<'a> {
    tokens: &'a [Token],
    index: usize,
    lower: String,
}

impl<'a> TokenContext<'a> {
    pub fn new(tokens: &'a [Token], index: usize) -> Self {
        Self {
            tokens,
            index,
            lower: tokens[index].lower(),
        }
    }

    pub fn text(&self) -> &str {
        &self.tokens[self.index].text
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn prev(&self) -> Option<&Token> {
        self.index.checked_sub(1).map(|i| &self.tokens[i])
    }

    pub fn next(&self) -> Option<&Token> {
        self.tokens.get(self.index + 1)
    }

    fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    fn prev_lower_in(&self, list: &[&str]) -> bool {
        self.prev().is_some_and(|t| list.contains(&t.lower().as_str()))
    }

    fn next_lower_in(&self, list: &[&str]) -> bool {
        self.next().is_some_and(|t| list.contains(&t.lower().as_str()))
    }

    fn lower_in(&self, list: &[&str]) -> bool {
        list.contains(&self.lower.as_str())
    }
}

/// Uma regra da cascata: se `apply` devolve `Some`, a tag está decidida.
#[derive(Clone, Copy)]
pub struct TagRule {
    pub name: &'static str,
    pub apply: fn(&TokenContext) -> Option<PosTag>,
}

impl std::fmt::Debug for TagRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRule").field("name", &self.name).finish()
    }
}

fn when(cond: bool, tag: PosTag) -> Option<PosTag> {
    cond.then_some(tag)
}

fn is_sentence_end(text: &str) -> bool {
    matches!(text, "." | "!" | "?")
}

fn cardinal(ctx: &TokenContext) -> Option<PosTag> {
    when(CARDINAL.is_match(ctx.text()), PosTag::Cd)
}

fn ordinal(ctx: &TokenContext) -> Option<PosTag> {
    when(ORDINAL.is_match(ctx.lower()), PosTag::Jj)
}

fn sentence_end(ctx: &TokenContext) -> Option<PosTag> {
    when(is_sentence_end(ctx.text()), PosTag::SentenceEnd)
}

fn separator(ctx: &TokenContext) -> Option<PosTag> {
    when(matches!(ctx.text(), "," | ";" | ":"), PosTag::Comma)
}

fn bracket(ctx: &TokenContext) -> Option<PosTag> {
    match ctx.text() {
        "(" | "[" | "{" => Some(PosTag::OpenBracket),
        ")" | "]" | "}" => Some(PosTag::CloseBracket),
        _ => None,
    }
}

fn quote(ctx: &TokenContext) -> Option<PosTag> {
    if !matches!(ctx.text(), "\"" | "'") {
        return None;
    }
    // Espaço nunca vira token, então o segundo ramo nunca é verdadeiro hoje.
    let opens = ctx.is_first()
        || ctx
            .prev()
            .is_some_and(|p| matches!(p.text.as_str(), " " | "\t" | "\n"));
    Some(if opens { PosTag::OpenQuote } else { PosTag::CloseQuote })
}

fn article(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(ARTICLES), PosTag::Dt)
}

fn copula(ctx: &TokenContext) -> Option<PosTag> {
    if !ctx.lower_in(COPULAS) {
        return None;
    }
    Some(match ctx.lower() {
        "is" => PosTag::Vbz,
        "are" => PosTag::Vbp,
        "was" | "were" => PosTag::Vbd,
        _ => PosTag::Vb,
    })
}

fn have_form(ctx: &TokenContext) -> Option<PosTag> {
    if !ctx.lower_in(HAVE_FORMS) {
        return None;
    }
    Some(match ctx.lower() {
        "has" => PosTag::Vbz,
        "had" => PosTag::Vbd,
        _ => PosTag::Vbp,
    })
}

fn do_form(ctx: &TokenContext) -> Option<PosTag> {
    if !ctx.lower_in(DO_FORMS) {
        return None;
    }
    Some(match ctx.lower() {
        "does" => PosTag::Vbz,
        "did" => PosTag::Vbd,
        _ => PosTag::Vbp,
    })
}

fn modal(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(MODALS), PosTag::Md)
}

fn personal_pronoun(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(PERSONAL_PRONOUNS), PosTag::Prp)
}

fn possessive_pronoun(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(POSSESSIVE_PRONOUNS), PosTag::PrpPossessive)
}

fn demonstrative(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(DEMONSTRATIVES), PosTag::Dt)
}

fn conjunction(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(CONJUNCTIONS), PosTag::Cc)
}

fn preposition(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(PREPOSITIONS), PosTag::In)
}

fn negation(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(NEGATIONS), PosTag::Rb)
}

fn degree_adverb(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower_in(DEGREE_ADVERBS), PosTag::Rb)
}

fn suffix_ly(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower().ends_with("ly"), PosTag::Rb)
}

fn suffix_ing(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower().ends_with("ing"), PosTag::Vbg)
}

fn suffix_ed(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower().ends_with("ed"), PosTag::Vbd)
}

fn suffix_er(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower().ends_with("er") && ctx.char_len() > 3, PosTag::Jjr)
}

fn suffix_est(ctx: &TokenContext) -> Option<PosTag> {
    when(ctx.lower().ends_with("est") && ctx.char_len() > 4, PosTag::Jjs)
}

fn suffix_s(ctx: &TokenContext) -> Option<PosTag> {
    let lower = ctx.lower();
    if !(lower.ends_with('s') && ctx.char_len() > 2 && !lower.ends_with("ss")) {
        return None;
    }
    if ctx.prev_lower_in(PLURAL_CUES) {
        Some(PosTag::Nns)
    } else {
        Some(PosTag::Vbz)
    }
}

fn suffix_noun(ctx: &TokenContext) -> Option<PosTag> {
    let lower = ctx.lower();
    let is_noun = ["tion", "sion", "ment", "ness"]
        .iter()
        .any(|suffix| lower.ends_with(suffix));
    when(is_noun, PosTag::Nn)
}

fn capitalized(ctx: &TokenContext) -> Option<PosTag> {
    let starts_upper = ctx.text().chars().next().is_some_and(char::is_uppercase);
    let after_terminator = ctx.prev().is_some_and(|p| is_sentence_end(&p.text));
    when(starts_upper && !ctx.is_first() && !after_terminator, PosTag::Nnp)
}

fn is_alphabetic(ctx: &TokenContext) -> bool {
    !ctx.text().is_empty() && ctx.text().chars().all(char::is_alphabetic)
}

fn noun_after_determiner(ctx: &TokenContext) -> Option<PosTag> {
    when(is_alphabetic(ctx) && ctx.prev_lower_in(NOUN_CUES), PosTag::Nn)
}

fn noun_before_verb(ctx: &TokenContext) -> Option<PosTag> {
    when(is_alphabetic(ctx) && ctx.next_lower_in(VERB_CUES), PosTag::Nn)
}

fn noun_default(ctx: &TokenContext) -> Option<PosTag> {
    when(is_alphabetic(ctx), PosTag::Nn)
}

fn symbol(_ctx: &TokenContext) -> Option<PosTag> {
    Some(PosTag::Sym)
}

/// A cascata padrão, na ordem de precedência.
pub const DEFAULT_RULES: &[TagRule] = &[
    TagRule { name: "cardinal", apply: cardinal },
    TagRule { name: "ordinal", apply: ordinal },
    TagRule { name: "sentence_end", apply: sentence_end },
    TagRule { name: "separator", apply: separator },
    TagRule { name: "bracket", apply: bracket },
    TagRule { name: "quote", apply: quote },
    TagRule { name: "article", apply: article },
    TagRule { name: "copula", apply: copula },
    TagRule { name: "have", apply: have_form },
    TagRule { name: "do", apply: do_form },
    TagRule { name: "modal", apply: modal },
    TagRule { name: "personal_pronoun", apply: personal_pronoun },
    TagRule { name: "possessive_pronoun", apply: possessive_pronoun },
    TagRule { name: "demonstrative", apply: demonstrative },
    TagRule { name: "conjunction", apply: conjunction },
    TagRule { name: "preposition", apply: preposition },
    TagRule { name: "negation", apply: negation },
    TagRule { name: "degree_adverb", apply: degree_adverb },
    TagRule { name: "suffix_ly", apply: suffix_ly },
    TagRule { name: "suffix_ing", apply: suffix_ing },
    TagRule { name: "suffix_ed", apply: suffix_ed },
    TagRule { name: "suffix_er", apply: suffix_er },
    TagRule { name: "suffix_est", apply: suffix_est },
    TagRule { name: "suffix_s", apply: suffix_s },
    TagRule { name: "suffix_noun", apply: suffix_noun },
    TagRule { name: "capitalized", apply: capitalized },
    TagRule { name: "noun_after_determiner", apply: noun_after_determiner },
    TagRule { name: "noun_before_verb", apply: noun_before_verb },
    TagRule { name: "noun_default", apply: noun_default },
    TagRule { name: "symbol", apply: symbol },
];

/// Motor da cascata de tags.
///
/// A última regra (`symbol`) sempre dispara, então todo token recebe
/// exatamente uma tag.
pub struct RuleEngine {
    rules: Vec<TagRule>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// Decide a tag de um token: primeira regra que dispara vence.
    pub fn tag_token(&self, ctx: &TokenContext) -> (PosTag, &'static str) {
        self.rules
            .iter()
            .find_map(|rule| (rule.apply)(ctx).map(|tag| (tag, rule.name)))
            .unwrap_or((PosTag::Sym, "symbol"))
    }

    /// Aplica a cascata a toda a sequência de tokens
    pub fn apply(&self, tokens: &[Token]) -> Vec<TaggedToken> {
        (0..tokens.len())
            .map(|i| {
                let ctx = TokenContext::new(tokens, i);
                let (tag, rule) = self.tag_token(&ctx);
                TaggedToken {
                    token: tokens[i].clone(),
                    tag,
                    rule: rule.to_string(),
                }
            })
            .collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Atalho: tokens → tokens etiquetados com a cascata padrão.
pub fn pos_tag(tokens: &[Token]) -> Vec<TaggedToken> {
    RuleEngine::new().apply(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn tags(text: &str) -> Vec<&'static str> {
        pos_tag(&tokenize(text)).iter().map(|t| t.label()).collect()
    }

    fn tag_of(text: &str, index: usize) -> (&'static str, String) {
        let tagged = pos_tag(&tokenize(text));
        (tagged[index].label(), tagged[index].rule.clone())
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tags("42"), ["CD"]);
        // "3rd" não é cardinal: o ordinal vence
        assert_eq!(tags("3rd 21ST"), ["JJ", "JJ"]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(tags("Go . no ! why ?"), ["NN", ".", "RB", ".", "NN", "."]);
        assert_eq!(tags("a , b ; c :"), ["DT", ",", "NN", ",", "NN", ","]);
        assert_eq!(tags("( [ { } ] )"), ["-LRB-", "-LRB-", "-LRB-", "-RRB-", "-RRB-", "-RRB-"]);
    }

    #[test]
    fn test_sentence_end_ignores_context() {
        for text in ["the end.", ". .", "He said: ok."] {
            let tagged = pos_tag(&tokenize(text));
            for t in tagged.iter().filter(|t| t.token.text == ".") {
                assert_eq!(t.tag, PosTag::SentenceEnd);
            }
        }
    }

    #[test]
    fn test_quotes() {
        // Primeiro token abre; qualquer outra posição fecha
        assert_eq!(tags("\"hi\""), ["``", "NN", "''"]);
        assert_eq!(tags("say \"hi"), ["NN", "''", "NN"]);
    }

    #[test]
    fn test_closed_classes() {
        assert_eq!(tags("The"), ["DT"]);
        assert_eq!(tags("is are was were been"), ["VBZ", "VBP", "VBD", "VBD", "VB"]);
        assert_eq!(tags("has had have"), ["VBZ", "VBD", "VBP"]);
        assert_eq!(tags("does did do"), ["VBZ", "VBD", "VBP"]);
        assert_eq!(tags("must"), ["MD"]);
        // "her" é pronome pessoal antes de possessivo
        assert_eq!(tags("her their"), ["PRP", "PRP$"]);
        assert_eq!(tags("those"), ["DT"]);
        // "for" e "so" caem em conjunção antes de preposição/advérbio
        assert_eq!(tags("for so"), ["CC", "CC"]);
        assert_eq!(tags("with"), ["IN"]);
        assert_eq!(tags("never very"), ["RB", "RB"]);
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(tag_of("quickly", 0), ("RB", "suffix_ly".into()));
        assert_eq!(tag_of("running", 0), ("VBG", "suffix_ing".into()));
        assert_eq!(tag_of("walked", 0), ("VBD", "suffix_ed".into()));
        assert_eq!(tag_of("faster", 0), ("JJR", "suffix_er".into()));
        // "her" já é pronome; "per" é curto demais para comparativo
        assert_eq!(tag_of("per", 0).0, "NN");
        assert_eq!(tag_of("fastest", 0), ("JJS", "suffix_est".into()));
        assert_eq!(tag_of("best", 0).0, "NN");
        assert_eq!(tag_of("nation", 0), ("NN", "suffix_noun".into()));
        assert_eq!(tag_of("kindness", 0), ("NN", "suffix_noun".into()));
    }

    #[test]
    fn test_suffix_s_depends_on_previous_token() {
        assert_eq!(tag_of("the cats", 1), ("NNS", "suffix_s".into()));
        assert_eq!(tag_of("several dogs", 1), ("NNS", "suffix_s".into()));
        assert_eq!(tag_of("she runs", 1), ("VBZ", "suffix_s".into()));
        // "-ss" não é plural
        assert_eq!(tag_of("the glass", 1).0, "NN");
    }

    #[test]
    fn test_capitalization() {
        assert_eq!(tag_of("Yesterday John ran", 1), ("NNP", "capitalized".into()));
        // primeiro token não é nome próprio pela heurística
        assert_eq!(tag_of("John ran quickly", 0), ("NN", "noun_default".into()));
        // início de sentença após terminador
        assert_eq!(tag_of("Stop. Mary left", 2), ("NN", "noun_default".into()));
    }

    #[test]
    fn test_noun_fallbacks() {
        assert_eq!(tag_of("the cat", 1), ("NN", "noun_after_determiner".into()));
        assert_eq!(tag_of("cat is", 0), ("NN", "noun_before_verb".into()));
        assert_eq!(tag_of("cat", 0), ("NN", "noun_default".into()));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(tags("@ % abc123 _"), ["SYM", "SYM", "SYM", "SYM"]);
    }

    #[test]
    fn test_every_token_gets_one_tag() {
        let tokens = tokenize("The 2nd of May, 1999: \"Dr. Who\" (again) ran 3 miles!");
        let tagged = pos_tag(&tokens);
        assert_eq!(tagged.len(), tokens.len());
        for (t, tok) in tagged.iter().zip(&tokens) {
            assert_eq!(&t.token, tok);
        }
    }

    #[test]
    fn test_cascade_ends_with_catch_all() {
        let engine = RuleEngine::new();
        assert_eq!(engine.rules().last().map(|r| r.name), Some("symbol"));
    }
}
