// src/services/document_service.rs

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use genpdf::{elements, style, Element};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, InvoiceRepository, PaymentRepository, ProjectRepository},
    models::{
        client::Client,
        finance::{Invoice, Payment},
        project::Project,
    },
};

const FONT_FAMILY: &str = "Roboto";

/// Tudo o que a fatura impressa precisa, já carregado do banco.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub invoice: Invoice,
    pub client: Option<Client>,
    pub project: Option<Project>,
    pub payments: Vec<Payment>,
}

impl InvoiceDocument {
    pub fn paid_total(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    pub fn balance(&self) -> Decimal {
        self.invoice.amount - self.paid_total()
    }
}

#[derive(Clone)]
pub struct InvoiceDocumentService {
    invoices: Arc<dyn InvoiceRepository>,
    clients: Arc<dyn ClientRepository>,
    projects: Arc<dyn ProjectRepository>,
    payments: Arc<dyn PaymentRepository>,
    fonts_dir: PathBuf,
}

impl InvoiceDocumentService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        clients: Arc<dyn ClientRepository>,
        projects: Arc<dyn ProjectRepository>,
        payments: Arc<dyn PaymentRepository>,
        fonts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            invoices,
            clients,
            projects,
            payments,
            fonts_dir: fonts_dir.into(),
        }
    }

    pub async fn load(&self, invoice_id: Uuid) -> Result<InvoiceDocument, AppError> {
        let invoice = self
            .invoices
            .get_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::not_found("Fatura não encontrada."))?;

        let client = self.clients.get_by_id(invoice.client_id).await?;
        let project = self.projects.get_by_id(invoice.project_id).await?;
        let payments = self.payments.get_by_invoice(invoice.id).await?;

        Ok(InvoiceDocument {
            invoice,
            client,
            project,
            payments,
        })
    }

    pub async fn generate_invoice_pdf(&self, invoice_id: Uuid) -> Result<Vec<u8>, AppError> {
        let document = self.load(invoice_id).await?;
        let fonts_dir = self.fonts_dir.clone();

        // genpdf é síncrono e pesado em CPU
        let pdf = tokio::task::spawn_blocking(move || render_invoice(&document, &fonts_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de renderização do PDF: {}", e))??;

        tracing::info!("📄 PDF da fatura {} gerado ({} bytes).", invoice_id, pdf.len());
        Ok(pdf)
    }
}

fn render_error(e: genpdf::error::Error) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn render_invoice(document: &InvoiceDocument, fonts_dir: &std::path::Path) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None).map_err(|_| {
        AppError::FontNotFound(format!("Fonte '{}' não encontrada em {}", FONT_FAMILY, fonts_dir.display()))
    })?;

    let invoice = &document.invoice;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Fatura {}", invoice.id));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(elements::Paragraph::new("FATURA").styled(style::Style::new().bold().with_font_size(18)));
    doc.push(
        elements::Paragraph::new(format!("Nº {}", invoice.id))
            .styled(style::Style::new().with_font_size(9)),
    );
    doc.push(elements::Break::new(1.5));

    match &document.client {
        Some(client) => {
            doc.push(elements::Paragraph::new(format!("Cliente: {}", client.name)));
            doc.push(elements::Paragraph::new(format!("Email: {}", client.email)));
            if let Some(company) = &client.company_name {
                doc.push(elements::Paragraph::new(format!("Empresa: {}", company)));
            }
        }
        None => doc.push(elements::Paragraph::new("Cliente: -")),
    }

    doc.push(elements::Paragraph::new(format!("Emissão: {}", format_date(invoice.issue_date))));
    doc.push(elements::Paragraph::new(format!("Vencimento: {}", format_date(invoice.due_date))));
    doc.push(elements::Paragraph::new(format!("Status: {}", invoice.status)));
    doc.push(elements::Break::new(2));

    // --- SERVIÇOS ---
    let style_bold = style::Style::new().bold();
    let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    table
        .row()
        .element(elements::Paragraph::new("Projeto").styled(style_bold))
        .element(elements::Paragraph::new("Horas").styled(style_bold))
        .element(elements::Paragraph::new("Valor/hora").styled(style_bold))
        .element(elements::Paragraph::new("Total").styled(style_bold))
        .push()
        .map_err(render_error)?;

    if let Some(project) = &document.project {
        let title = match &project.description {
            Some(description) if !description.trim().is_empty() => {
                format!("{} - {}", project.title, description.trim())
            }
            _ => project.title.clone(),
        };

        table
            .row()
            .element(elements::Paragraph::new(title))
            .element(elements::Paragraph::new(format!("{:.2}", project.total_hours)))
            .element(elements::Paragraph::new(format!("R$ {:.2}", project.hourly_rate)))
            .element(elements::Paragraph::new(format!("R$ {:.2}", project.total_earned())))
            .push()
            .map_err(render_error)?;
    }

    doc.push(table);
    doc.push(elements::Break::new(2));

    // --- TOTAIS ---
    for (label, value, bold) in [
        ("Valor da fatura", invoice.amount, true),
        ("Total pago", document.paid_total(), false),
        ("Saldo", document.balance(), true),
    ] {
        let mut paragraph = elements::Paragraph::new(format!("{}: R$ {:.2}", label, value));
        paragraph.set_alignment(genpdf::Alignment::Right);
        let style = if bold {
            style::Style::new().bold().with_font_size(12)
        } else {
            style::Style::new().with_font_size(11)
        };
        doc.push(paragraph.styled(style));
    }

    if !document.payments.is_empty() {
        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new("PAGAMENTOS").styled(style::Style::new().bold().with_font_size(12)));

        for payment in &document.payments {
            doc.push(elements::Paragraph::new(format!(
                "{} - {} - R$ {:.2}",
                format_date(payment.payment_date),
                payment.payment_method,
                payment.amount
            )));
        }
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(render_error)?;

    Ok(buffer)
}
