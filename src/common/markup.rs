// src/common/markup.rs

//! Renderização segura do texto devolvido pelo assistente.
//!
//! Gramática suportada (subconjunto de Markdown):
//! - `**texto**` vira `<b>texto</b>`; o par precisa fechar na mesma linha e o
//!   casamento é o mais curto possível. Um `**` sem par fica literal.
//! - `\n` vira `<br/>`.
//!
//! Todo o resto é escapado antes, de modo que nenhuma marcação vinda da
//! entrada chega ao HTML final.

const BOLD: &str = "**";

pub fn render(text: &str) -> String {
    text.split('\n')
        .map(|line| render_line(&escape(line)))
        .collect::<Vec<_>>()
        .join("<br/>")
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(BOLD) {
        let after_open = &rest[open + BOLD.len()..];
        match after_open.find(BOLD) {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str("<b>");
                out.push_str(&after_open[..close]);
                out.push_str("</b>");
                rest = &after_open[close + BOLD.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
