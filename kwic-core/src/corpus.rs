//! # Textos de Demonstração
//!
//! Pequenos textos em inglês (domínio público) usados pela interface web e pela
//! demo de terminal quando nenhum arquivo é informado.

/// Textos de demonstração: (domínio, texto)
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Novel",
            "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife. However little known the feelings or views of such a man may be on his first entering a neighbourhood, this truth is so well fixed in the minds of the surrounding families, that he is considered the rightful property of some one or other of their daughters. \"My dear Mr Bennet,\" said his lady to him one day, \"have you heard that Netherfield Park is let at last?\" Mr Bennet replied that he had not.",
        ),
        (
            "Travel",
            "Yesterday Elizabeth travelled from London to Derbyshire with her aunt and uncle. They stayed in Lambton for three nights, and on the 2nd day they visited Pemberley. Mr Darcy was not expected, but he arrived early and greeted them warmly. Elizabeth and Jane wrote letters that evening.",
        ),
        (
            "Business",
            "Shares of Acme Corp rose 5 points after the company reported higher earnings. Analysts at Northwind Bank said the results were stronger than expected, and the stock is now trading at its highest level since 1999. The board will meet in Boston to discuss the merger with Globex Inc before the end of the quarter.",
        ),
    ]
}

/// Texto de demonstração de um domínio (comparação sem caixa).
pub fn demo_text(domain: &str) -> Option<&'static str> {
    demo_texts()
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(domain))
        .map(|(_, text)| text)
}
