// src/services/document_service.rs

use std::path::{Path, PathBuf};

use genpdf::{elements, style, Alignment, Element};

use crate::{
    common::{error::AppError, money::format_brl},
    models::reports::ReportSummary,
};

// Família carregada da pasta de fontes (Roboto-Regular.ttf, Roboto-Bold.ttf, ...)
pub const FONT_FAMILY: &str = "Roboto";

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::PdfError(e.to_string())
}

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
}

impl DocumentService {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self { fonts_dir: fonts_dir.into() }
    }

    /// Gera a versão impressa dos "Relatórios Gerenciais".
    /// A renderização do genpdf é síncrona, então roda fora do runtime.
    pub async fn render_report_pdf(&self, summary: ReportSummary, lang: &str) -> Result<Vec<u8>, AppError> {
        let fonts_dir = self.fonts_dir.clone();
        let lang = lang.to_string();

        tokio::task::spawn_blocking(move || render_report(&fonts_dir, &summary, &lang))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de geração do PDF: {}", e))?
    }
}

fn render_report(fonts_dir: &Path, summary: &ReportSummary, lang: &str) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None)
        .map_err(|e| pdf_error(format!("fonte não encontrada em {}: {}", fonts_dir.display(), e)))?;

    let english = lang == "en";
    let text = |pt: &'static str, en: &'static str| if english { en } else { pt };

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(text("Relatórios Gerenciais", "Management Reports"));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(
        elements::Paragraph::new("MallWorks - Portal de Obras")
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(
        elements::Paragraph::new(text("Relatórios Gerenciais", "Management Reports"))
            .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Paragraph::new(format!(
        "{}: {}",
        text("Emitido em", "Issued on"),
        chrono::Local::now().format("%d/%m/%Y %H:%M")
    )));
    doc.push(elements::Break::new(1.5));

    // --- INDICADORES ---
    doc.push(elements::Paragraph::new(format!(
        "{}: {}",
        text("Orçamento Total Aprovado", "Total Approved Budget"),
        format_brl(summary.total_budget)
    )));
    doc.push(elements::Paragraph::new(format!(
        "{}: {}%",
        text("Progresso Médio das Obras", "Average Progress"),
        summary.average_progress
    )));
    doc.push(elements::Paragraph::new(format!(
        "{}: {}",
        text("Tipos de Loja Ativos", "Active Store Types"),
        summary.store_type_count
    )));
    doc.push(elements::Break::new(1));

    for slice in &summary.store_type_distribution {
        doc.push(elements::Paragraph::new(format!("  {}: {}", slice.name, slice.value)));
    }
    doc.push(elements::Break::new(1));

    for entry in &summary.budget_by_status {
        doc.push(elements::Paragraph::new(format!("  {}: {}", entry.label, format_brl(entry.amount))));
    }
    doc.push(elements::Break::new(2));

    // --- TABELA ---
    doc.push(
        elements::Paragraph::new(text("Detalhamento Financeiro por Obra", "Financial Breakdown by Project"))
            .styled(style::Style::new().bold().with_font_size(12)),
    );

    // Pesos das colunas: Loja (3), Tipo (2), Status (2), Orçamento (3), Progresso (1)
    let mut table = elements::TableLayout::new(vec![3, 2, 2, 3, 1]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new(text("Loja", "Store")).styled(style_bold))
        .element(elements::Paragraph::new(text("Tipo", "Type")).styled(style_bold))
        .element(elements::Paragraph::new("Status").styled(style_bold))
        .element(elements::Paragraph::new(text("Orçamento", "Budget")).styled(style_bold))
        .element(elements::Paragraph::new("%").styled(style_bold))
        .push()
        .map_err(pdf_error)?;

    for row in &summary.rows {
        table
            .row()
            .element(elements::Paragraph::new(row.store_name.as_str()))
            .element(elements::Paragraph::new(row.store_type.as_str()))
            .element(elements::Paragraph::new(row.status_label.as_str()))
            .element(elements::Paragraph::new(row.budget_display.as_str()))
            .element(elements::Paragraph::new(format!("{}%", row.progress)))
            .push()
            .map_err(pdf_error)?;
    }

    table
        .row()
        .element(elements::Paragraph::new("TOTAL").styled(style_bold))
        .element(elements::Paragraph::new(""))
        .element(elements::Paragraph::new(""))
        .element(elements::Paragraph::new(summary.totals.total_budget_display.as_str()).styled(style_bold))
        .element(elements::Paragraph::new(""))
        .push()
        .map_err(pdf_error)?;

    doc.push(table);
    doc.push(elements::Break::new(2));

    let mut footer = elements::Paragraph::new(format!(
        "{}: {}",
        text("Obras listadas", "Projects listed"),
        summary.totals.project_count
    ));
    footer.set_alignment(Alignment::Right);
    doc.push(footer.styled(style::Style::new().italic().with_font_size(8)));

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;

    Ok(buffer)
}
