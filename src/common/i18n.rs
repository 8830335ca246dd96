// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_LANG: &str = "pt";

// Tabela de mensagens por idioma: idioma -> chave -> texto
type MessageTable = HashMap<&'static str, HashMap<&'static str, &'static str>>;

/// Catálogo de mensagens de erro traduzidas.
///
/// O português é o idioma de referência: qualquer chave que falte em outro
/// idioma cai para o texto em `pt`.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: Arc<MessageTable>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: MessageTable = HashMap::new();

        messages.insert(
            "pt",
            HashMap::from([
                ("validation_failed", "Um ou mais campos são inválidos."),
                ("invalid_credentials", "Credenciais inválidas. Tente novamente."),
                ("invalid_token", "Token de autenticação inválido ou ausente."),
                ("user_not_found", "Usuário não encontrado."),
                ("email_already_exists", "Este e-mail já está em uso."),
                ("resource_not_found", "Recurso não encontrado"),
                ("unique_violation", "Registro duplicado"),
                ("invariant_violation", "Dados inconsistentes"),
                ("forbidden", "Você precisa da permissão"),
                ("request_in_flight", "Aguarde a resposta da solicitação anterior."),
                ("pdf_error", "Não foi possível gerar o relatório em PDF."),
                ("internal_error", "Ocorreu um erro inesperado."),
            ]),
        );

        messages.insert(
            "en",
            HashMap::from([
                ("validation_failed", "One or more fields are invalid."),
                ("invalid_credentials", "Invalid credentials. Please try again."),
                ("invalid_token", "Missing or invalid authentication token."),
                ("user_not_found", "User not found."),
                ("email_already_exists", "This e-mail is already in use."),
                ("resource_not_found", "Resource not found"),
                ("unique_violation", "Duplicate record"),
                ("invariant_violation", "Inconsistent data"),
                ("forbidden", "You need the permission"),
                ("request_in_flight", "Please wait for the previous request to finish."),
                ("pdf_error", "Could not generate the PDF report."),
                ("internal_error", "An unexpected error occurred."),
                // Em `pt` valem as mensagens declaradas nos próprios payloads
                ("validation.required", "This field is required."),
                ("validation.blank", "This field cannot be blank."),
                ("validation.email", "The e-mail provided is invalid."),
                ("validation.length", "Invalid length."),
                ("validation.range", "Value out of range."),
                ("validation.unknown_status", "Unknown status."),
            ]),
        );

        Self { messages: Arc::new(messages) }
    }

    /// Procura a chave apenas no idioma pedido, sem fallback.
    pub fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.messages.get(lang).and_then(|table| table.get(key)).copied()
    }

    /// Procura a chave no idioma pedido, depois em `pt`; se nada existir devolve a própria chave.
    pub fn get(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
