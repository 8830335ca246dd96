// src/db/seed.rs

// Dados de demonstração carregados na inicialização.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    auth::{User, UserRole, UserStatus},
    chat::{ChatMessage, ChatRole},
    project::{Progress, Project, ProjectStatus},
    rbac::{Permission, PermissionGroup, PermissionMatrix},
};

pub const WELCOME_MESSAGE: &str = "Olá! Sou o assistente virtual do Portal de Obras. Posso ajudar com normas técnicas, horários ou dúvidas sobre documentação.";

#[allow(clippy::too_many_arguments)]
fn project(
    id: u128,
    store_name: &str,
    store_number: &str,
    title: &str,
    description: &str,
    status: ProjectStatus,
    store_type: &str,
    progress: u8,
    budget: i64,
    start_date: (i32, u32, u32),
    manager: &str,
) -> Project {
    let (year, month, day) = start_date;
    Project {
        id: Uuid::from_u128(id),
        store_name: store_name.to_string(),
        store_number: store_number.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        store_type: store_type.to_string(),
        start_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        completion_date: None,
        budget: Some(Decimal::new(budget, 0)),
        progress: Progress::try_from(progress).unwrap_or(Progress::ZERO),
        manager: manager.to_string(),
        documents: Vec::new(),
    }
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "Zara",
            "102",
            "Expansão do Mezanino",
            "Reforma completa do segundo piso com nova iluminação e piso.",
            ProjectStatus::InProgress,
            "Vestuário",
            65,
            450_000,
            (2023, 10, 15),
            "Ana Costa",
        ),
        project(
            2,
            "Starbucks",
            "KIOSK-04",
            "Instalação Hidráulica",
            "Adequação de ponto de água e esgoto para nova máquina.",
            ProjectStatus::Analysis,
            "Alimentação",
            10,
            25_000,
            (2023, 11, 1),
            "Carlos Oliveira",
        ),
        project(
            3,
            "Livraria Cultura",
            "205",
            "Troca de Vitrine",
            "Substituição dos vidros frontais e pintura.",
            ProjectStatus::Approved,
            "Serviços",
            0,
            85_000,
            (2023, 11, 20),
            "Roberto Dias",
        ),
        project(
            4,
            "Cinema Multiplex",
            "400",
            "Reforma Sala 3",
            "Troca de carpetes e poltronas.",
            ProjectStatus::Blocked,
            "Lazer",
            30,
            120_000,
            (2023, 9, 10),
            "Fernanda Lima",
        ),
        project(
            5,
            "Gelato Italia",
            "KIOSK-12",
            "Novo Quiosque",
            "Instalação completa de quiosque padrão.",
            ProjectStatus::Completed,
            "Alimentação",
            100,
            60_000,
            (2023, 8, 1),
            "Pedro Santos",
        ),
    ]
}

fn user(id: u128, name: &str, email: &str, role: UserRole, status: UserStatus, last_access: &str) -> User {
    User {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        last_access: last_access.to_string(),
    }
}

pub fn demo_users() -> Vec<User> {
    vec![
        user(0x101, "João Silva", "joao.eng@mall.com", UserRole::Engineer, UserStatus::Active, "Hoje, 09:30"),
        user(0x102, "Maria Souza", "maria.admin@mall.com", UserRole::Admin, UserStatus::Active, "Ontem, 18:00"),
        user(0x103, "Zara Manager", "loja102@zara.com", UserRole::Tenant, UserStatus::Active, "2 dias atrás"),
        user(0x104, "Auditoria Externa", "audit@company.com", UserRole::Auditor, UserStatus::Inactive, "1 semana atrás"),
    ]
}

pub fn demo_permission_matrix() -> PermissionMatrix {
    use UserRole::*;

    PermissionMatrix::new(vec![
        PermissionGroup {
            category: "Projetos e Obras".to_string(),
            permissions: vec![
                Permission::new("view_projects", "Visualizar Obras", &[Admin, Engineer, Tenant, Auditor]),
                Permission::new("create_project", "Criar Solicitação", &[Tenant, Admin]),
                Permission::new("approve_project", "Aprovar/Rejeitar Etapas", &[Admin, Engineer]),
                Permission::new("delete_project", "Excluir Registros", &[Admin]),
            ],
        },
        PermissionGroup {
            category: "Documentação".to_string(),
            permissions: vec![
                Permission::new("upload_docs", "Upload de Documentos", &[Tenant, Engineer, Admin]),
                Permission::new("validate_docs", "Validar Normas Técnicas", &[Engineer, Admin]),
            ],
        },
        PermissionGroup {
            category: "Financeiro & Relatórios".to_string(),
            permissions: vec![
                Permission::new("view_budget", "Visualizar Orçamentos", &[Admin, Auditor, Tenant]),
                Permission::new("view_dashboard", "Acesso aos Dashboards", &[Admin, Engineer, Auditor]),
            ],
        },
        PermissionGroup {
            category: "Sistema".to_string(),
            permissions: vec![
                Permission::new("manage_users", "Gerenciar Usuários", &[Admin]),
                Permission::new("edit_settings", "Configurações Globais", &[Admin]),
            ],
        },
    ])
}

pub fn welcome_message() -> ChatMessage {
    ChatMessage::new(ChatRole::Model, WELCOME_MESSAGE)
}
