// src/common/validation.rs

use validator::ValidationError;

// ---
// Validação Customizada
// ---
// `length(min = 1)` aceitaria "   ", por isso os campos obrigatórios usam esta.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}
