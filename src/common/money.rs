// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Formata um valor no padrão monetário brasileiro: `R$ 450.000,00`.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

// Orçamento ausente ou zerado aparece como "-" nas tabelas
pub fn budget_display(budget: Option<Decimal>) -> String {
    match budget {
        Some(value) if !value.is_zero() => format_brl(value),
        _ => "-".to_string(),
    }
}
