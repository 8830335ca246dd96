// src/db/rbac_repo.rs

use std::{collections::VecDeque, sync::Arc};

use tokio::sync::RwLock;

use crate::models::rbac::PermissionMatrix;

// Quantas versões anteriores ficam disponíveis para desfazer
pub const MAX_UNDO: usize = 50;

struct RbacState {
    current: PermissionMatrix,
    // Versões anteriores, da mais antiga para a mais recente
    history: VecDeque<PermissionMatrix>,
}

#[derive(Clone)]
pub struct RbacRepository {
    state: Arc<RwLock<RbacState>>,
}

impl RbacRepository {
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self {
            state: Arc::new(RwLock::new(RbacState { current: matrix, history: VecDeque::new() })),
        }
    }

    pub async fn current(&self) -> PermissionMatrix {
        self.state.read().await.current.clone()
    }

    /// Aplica uma transformação à matriz atual sob um único lock de escrita.
    /// A versão anterior vai para o histórico apenas se `update` der certo;
    /// acima de `MAX_UNDO` versões a mais antiga é descartada.
    pub async fn replace_with<F, E>(&self, update: F) -> Result<PermissionMatrix, E>
    where
        F: FnOnce(&PermissionMatrix) -> Result<PermissionMatrix, E>,
    {
        let mut state = self.state.write().await;
        let next = update(&state.current)?;
        let previous = std::mem::replace(&mut state.current, next.clone());
        if state.history.len() == MAX_UNDO {
            state.history.pop_front();
        }
        state.history.push_back(previous);
        Ok(next)
    }

    // Volta para a versão anterior; `None` se não houver o que desfazer
    pub async fn restore_previous(&self) -> Option<PermissionMatrix> {
        let mut state = self.state.write().await;
        let previous = state.history.pop_back()?;
        state.current = previous.clone();
        Some(previous)
    }

    pub async fn history_len(&self) -> usize {
        self.state.read().await.history.len()
    }

    // Esquece as versões anteriores; devolve quantas havia
    pub async fn clear_history(&self) -> usize {
        let mut state = self.state.write().await;
        let discarded = state.history.len();
        state.history.clear();
        discarded
    }
}
