// src/services/assistant_service.rs

use std::{
    collections::HashSet,
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ChatRepository,
    models::chat::{ChatExchange, ChatMessage, ChatRole, ScopeAnalysis},
    services::text_generator::{AssistantError, TextGenerator},
};

pub const CHAT_PERSONA: &str = "Você é o assistente virtual do Portal de Obras do Shopping. Você ajuda lojistas, arquitetos e engenheiros com dúvidas sobre processos, normas técnicas (NBR), horários de carga e descarga, e documentação necessária. Responda sempre de forma polida, profissional e concisa.";

pub const ANALYSIS_EMPTY_FALLBACK: &str = "Não foi possível gerar a análise no momento.";
pub const ANALYSIS_ERROR_FALLBACK: &str = "Erro ao conectar com o serviço de IA. Verifique sua chave de API.";
pub const CHAT_FALLBACK: &str = "Desculpe, estou com dificuldades de conexão no momento.";

// Os dois "botões" que disparam chamadas ao assistente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Control {
    Analyze,
    Chat,
}

// Registro das chamadas em andamento (usuário, controle)
#[derive(Clone, Default)]
struct InFlight {
    active: Arc<Mutex<HashSet<(Uuid, Control)>>>,
}

impl InFlight {
    fn acquire(&self, user_id: Uuid, control: Control) -> Result<InFlightGuard, AppError> {
        let mut active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !active.insert((user_id, control)) {
            return Err(AppError::RequestInFlight);
        }
        Ok(InFlightGuard { registry: self.clone(), key: (user_id, control) })
    }
}

// Libera o controle em qualquer caminho de saída, inclusive cancelamento
struct InFlightGuard {
    registry: InFlight,
    key: (Uuid, Control),
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut active = self
            .registry
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        active.remove(&self.key);
    }
}

fn scope_prompt(description: &str, store_type: &str) -> String {
    format!(
        r#"
      Atue como um Engenheiro Civil Sênior especializado em normas de Shopping Centers (ABNT/NBR).
      Analise o seguinte escopo de obra para uma loja do tipo "{store_type}":
      "{description}"

      Forneça uma resposta formatada em Markdown contendo:
      1. Lista de Documentos Técnicos Prováveis necessários (ex: RRT, ART, Projetos).
      2. Principais Riscos de Segurança a mitigar.
      3. Sugestão de cronograma macro (em semanas) para esse tipo de intervenção.

      Seja direto, técnico e profissional.
    "#
    )
}

#[derive(Clone)]
pub struct AssistantService {
    generator: Arc<dyn TextGenerator>,
    chat_repo: ChatRepository,
    timeout: Duration,
    in_flight: InFlight,
}

impl AssistantService {
    pub fn new(generator: Arc<dyn TextGenerator>, chat_repo: ChatRepository, timeout: Duration) -> Self {
        Self { generator, chat_repo, timeout, in_flight: InFlight::default() }
    }

    // Aplica o timeout; uma chamada travada vira erro e, portanto, fallback
    async fn call<F>(&self, call: F) -> Result<String, AssistantError>
    where
        F: Future<Output = Result<String, AssistantError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(AssistantError::Timeout))
    }

    /// Análise de escopo/riscos de uma solicitação de obra. Nunca falha por causa da IA.
    pub async fn analyze_scope(
        &self,
        user_id: Uuid,
        description: &str,
        store_type: &str,
    ) -> Result<ScopeAnalysis, AppError> {
        let _guard = self.in_flight.acquire(user_id, Control::Analyze)?;

        let prompt = scope_prompt(description, store_type);
        let analysis = match self.call(self.generator.generate(&prompt, None)).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => ANALYSIS_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                tracing::error!("Erro ao analisar projeto: {}", e);
                ANALYSIS_ERROR_FALLBACK.to_string()
            }
        };

        Ok(ScopeAnalysis::new(analysis))
    }

    pub async fn history(&self, user_id: Uuid) -> Vec<ChatMessage> {
        self.chat_repo.history(user_id).await
    }

    /// Envia uma mensagem ao chat: consulta a IA com todo o histórico anterior e
    /// só então grava pergunta e resposta (ou o fallback) juntas. Se a requisição
    /// for cancelada no meio da chamada, o histórico fica como estava.
    pub async fn send_message(&self, user_id: Uuid, text: &str) -> Result<ChatExchange, AppError> {
        let _guard = self.in_flight.acquire(user_id, Control::Chat)?;

        let history = self.chat_repo.history(user_id).await;
        let user_message = ChatMessage::new(ChatRole::User, text);

        let reply_text = match self
            .call(self.generator.converse(&history, text, Some(CHAT_PERSONA)))
            .await
        {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => CHAT_FALLBACK.to_string(),
            Err(e) => {
                tracing::error!("Chat Error: {}", e);
                CHAT_FALLBACK.to_string()
            }
        };

        let reply = ChatMessage::new(ChatRole::Model, reply_text);
        self.chat_repo
            .append_exchange(user_id, user_message.clone(), reply.clone())
            .await;

        Ok(ChatExchange {
            user_message: user_message.into(),
            reply: reply.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_generator::UnconfiguredGenerator;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    // Devolve sempre o mesmo texto e registra o que recebeu
    struct EchoGenerator {
        reply: String,
        seen: Mutex<Vec<(usize, String, Option<String>)>>,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, prompt: &str, _context: Option<&str>) -> Result<String, AssistantError> {
            self.seen.lock().unwrap().push((0, prompt.to_string(), None));
            Ok(self.reply.clone())
        }

        async fn converse(
            &self,
            history: &[ChatMessage],
            new_message: &str,
            system_instruction: Option<&str>,
        ) -> Result<String, AssistantError> {
            self.seen.lock().unwrap().push((
                history.len(),
                new_message.to_string(),
                system_instruction.map(str::to_string),
            ));
            Ok(self.reply.clone())
        }
    }

    // Trava até ser liberado
    struct StuckGenerator {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl TextGenerator for StuckGenerator {
        async fn generate(&self, _prompt: &str, _context: Option<&str>) -> Result<String, AssistantError> {
            self.release.notified().await;
            Ok("tarde demais".into())
        }

        async fn converse(
            &self,
            _history: &[ChatMessage],
            _new_message: &str,
            _system_instruction: Option<&str>,
        ) -> Result<String, AssistantError> {
            self.release.notified().await;
            Ok("tarde demais".into())
        }
    }

    fn echo(reply: &str) -> Arc<EchoGenerator> {
        Arc::new(EchoGenerator { reply: reply.to_string(), seen: Mutex::new(Vec::new()) })
    }

    #[tokio::test]
    async fn analysis_prompt_carries_scope_and_store_type() {
        let generator = echo("**Documentos**: ART");
        let service = AssistantService::new(generator.clone(), ChatRepository::new(), Duration::from_secs(1));

        let result = service.analyze_scope(Uuid::new_v4(), "Troca de piso", "Quiosque").await.unwrap();

        assert_eq!(result.analysis, "**Documentos**: ART");
        assert_eq!(result.html, "<b>Documentos</b>: ART");
        let seen = generator.seen.lock().unwrap();
        assert!(seen[0].1.contains("\"Troca de piso\""));
        assert!(seen[0].1.contains("loja do tipo \"Quiosque\""));
    }

    #[tokio::test]
    async fn analysis_failures_become_fallback_text() {
        let failing = AssistantService::new(Arc::new(UnconfiguredGenerator), ChatRepository::new(), Duration::from_secs(1));
        let result = failing.analyze_scope(Uuid::new_v4(), "Pintura", "Serviços").await.unwrap();
        assert_eq!(result.analysis, ANALYSIS_ERROR_FALLBACK);

        let empty = AssistantService::new(echo("  "), ChatRepository::new(), Duration::from_secs(1));
        let result = empty.analyze_scope(Uuid::new_v4(), "Pintura", "Serviços").await.unwrap();
        assert_eq!(result.analysis, ANALYSIS_EMPTY_FALLBACK);
    }

    #[tokio::test]
    async fn chat_sends_prior_history_and_appends_both_messages() {
        let generator = echo("Carga e descarga das 22h às 6h.");
        let service = AssistantService::new(generator.clone(), ChatRepository::new(), Duration::from_secs(1));
        let user = Uuid::new_v4();

        let first = service.send_message(user, "Qual o horário de carga?").await.unwrap();
        assert_eq!(first.reply.message.text, "Carga e descarga das 22h às 6h.");
        service.send_message(user, "E aos domingos?").await.unwrap();

        let history = service.history(user).await;
        let roles: Vec<ChatRole> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::Model, ChatRole::User, ChatRole::Model, ChatRole::User, ChatRole::Model]
        );

        let seen = generator.seen.lock().unwrap();
        // Primeira chamada: só a boas-vindas; segunda: boas-vindas + troca anterior
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[1].0, 3);
        assert_eq!(seen[1].1, "E aos domingos?");
        assert_eq!(seen[1].2.as_deref(), Some(CHAT_PERSONA));
    }

    #[tokio::test]
    async fn chat_failure_appends_fallback() {
        let service = AssistantService::new(Arc::new(UnconfiguredGenerator), ChatRepository::new(), Duration::from_secs(1));
        let user = Uuid::new_v4();

        let exchange = service.send_message(user, "Oi").await.unwrap();

        assert_eq!(exchange.reply.message.text, CHAT_FALLBACK);
        assert_eq!(service.history(user).await.len(), 3);
    }

    #[tokio::test]
    async fn hung_call_times_out_into_fallback_and_releases_control() {
        let release = Arc::new(Notify::new());
        let service = AssistantService::new(
            Arc::new(StuckGenerator { release: release.clone() }),
            ChatRepository::new(),
            Duration::from_millis(50),
        );
        let user = Uuid::new_v4();

        let exchange = service.send_message(user, "Alô?").await.unwrap();
        assert_eq!(exchange.reply.message.text, CHAT_FALLBACK);

        // O controle foi liberado: outra mensagem pode ser enviada
        let again = service.send_message(user, "Alô de novo?").await.unwrap();
        assert_eq!(again.reply.message.text, CHAT_FALLBACK);
    }

    #[tokio::test]
    async fn cancelled_chat_request_leaves_history_untouched() {
        let release = Arc::new(Notify::new());
        let service = AssistantService::new(
            Arc::new(StuckGenerator { release: release.clone() }),
            ChatRepository::new(),
            Duration::from_secs(5),
        );
        let user = Uuid::new_v4();

        // O cliente desiste antes da resposta: o future é descartado
        let dropped = tokio::time::timeout(Duration::from_millis(30), service.send_message(user, "Oi")).await;
        assert!(dropped.is_err());

        let roles: Vec<ChatRole> = service.history(user).await.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Model]);

        // O controle também foi liberado
        assert!(service.in_flight.acquire(user, Control::Chat).is_ok());
    }

    #[tokio::test]
    async fn second_request_from_same_control_is_rejected_while_first_is_pending() {
        let release = Arc::new(Notify::new());
        let service = AssistantService::new(
            Arc::new(StuckGenerator { release: release.clone() }),
            ChatRepository::new(),
            Duration::from_secs(5),
        );
        let user = Uuid::new_v4();

        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.analyze_scope(user, "Fachada", "Vestuário").await })
        };
        // Dá tempo para a primeira chamada registrar o controle
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = service.analyze_scope(user, "Fachada", "Vestuário").await;
        assert!(matches!(second, Err(AppError::RequestInFlight)));

        release.notify_one();
        let first = pending.await.unwrap().unwrap();
        assert_eq!(first.analysis, "tarde demais");
    }
}
