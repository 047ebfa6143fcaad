// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        PgClientRepository, PgExpenseRepository, PgFileRepository, PgInvoiceRepository,
        PgPaymentRepository, PgProjectRepository, PgTaskItemRepository, PgUserRepository,
    },
    services::{
        auth::{AuthService, IdentityClaim},
        blob_storage::S3BlobStorage,
        client_service::ClientService,
        document_service::InvoiceDocumentService,
        expense_service::ExpenseService,
        file_service::ProjectFileService,
        invoice_service::InvoiceService,
        payment_service::PaymentService,
        project_service::ProjectService,
        task_item_service::TaskItemService,
        user_service::UserService,
    },
};

const DEFAULT_JWT_AUDIENCE: &str = "authenticated";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BLOB_REGION: &str = "us-east-1";
const DEFAULT_FONTS_DIR: &str = "./fonts";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_user_id_claim: IdentityClaim,

    pub cors_allowed_origins: Vec<String>,
    pub bind_addr: String,

    pub blob_bucket: String,
    pub blob_region: String,
    pub blob_endpoint_url: Option<String>,
    pub blob_access_key_id: Option<String>,
    pub blob_secret_access_key: Option<String>,
    pub blob_public_base_url: Option<String>,

    pub fonts_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_user_id_claim = optional("JWT_USER_ID_CLAIM")
            .map(|raw| raw.parse::<IdentityClaim>())
            .transpose()?
            .unwrap_or(IdentityClaim::Subject);

        let cors_allowed_origins = optional("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let max_upload_bytes = match optional("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES inválido: '{}'", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: required("JWT_ISSUER")?,
            jwt_audience: optional("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_JWT_AUDIENCE.to_string()),
            jwt_user_id_claim,
            cors_allowed_origins,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            blob_bucket: required("BLOB_BUCKET")?,
            blob_region: optional("BLOB_REGION").unwrap_or_else(|| DEFAULT_BLOB_REGION.to_string()),
            blob_endpoint_url: optional("BLOB_ENDPOINT_URL"),
            blob_access_key_id: optional("BLOB_ACCESS_KEY_ID"),
            blob_secret_access_key: optional("BLOB_SECRET_ACCESS_KEY"),
            blob_public_base_url: optional("BLOB_PUBLIC_BASE_URL"),
            fonts_dir: optional("FONTS_DIR")
                .unwrap_or_else(|| DEFAULT_FONTS_DIR.to_string())
                .into(),
            max_upload_bytes,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        use crate::services::auth::test_support;

        Self {
            database_url: "postgres://localhost/freelancer_hub_test".to_string(),
            jwt_secret: test_support::SECRET.to_string(),
            jwt_issuer: test_support::ISSUER.to_string(),
            jwt_audience: test_support::AUDIENCE.to_string(),
            jwt_user_id_claim: IdentityClaim::Subject,
            cors_allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            blob_bucket: "freelancer-hub".to_string(),
            blob_region: DEFAULT_BLOB_REGION.to_string(),
            blob_endpoint_url: None,
            blob_access_key_id: None,
            blob_secret_access_key: None,
            blob_public_base_url: None,
            fonts_dir: DEFAULT_FONTS_DIR.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    optional(key).with_context(|| format!("{} deve ser definida", key))
}

// Variável vazia conta como ausente
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub client_service: ClientService,
    pub project_service: ProjectService,
    pub task_item_service: TaskItemService,
    pub invoice_service: InvoiceService,
    pub payment_service: PaymentService,
    pub expense_service: ExpenseService,
    pub file_service: ProjectFileService,
    pub document_service: InvoiceDocumentService,
}

impl AppState {
    /// Conecta ao banco, roda as migrações e monta o grafo de dependências.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        let storage = S3BlobStorage::from_config(config).await?;
        tracing::info!("✅ Armazenamento de arquivos configurado (bucket '{}')", config.blob_bucket);

        Ok(Self::from_parts(config, db_pool, Arc::new(storage)))
    }

    fn from_parts(
        config: &Config,
        db_pool: PgPool,
        storage: Arc<S3BlobStorage>,
    ) -> Self {
        // --- Monta o gráfico de dependências ---
        let users = Arc::new(PgUserRepository::new(db_pool.clone()));
        let clients = Arc::new(PgClientRepository::new(db_pool.clone()));
        let projects = Arc::new(PgProjectRepository::new(db_pool.clone()));
        let tasks = Arc::new(PgTaskItemRepository::new(db_pool.clone()));
        let invoices = Arc::new(PgInvoiceRepository::new(db_pool.clone()));
        let payments = Arc::new(PgPaymentRepository::new(db_pool.clone()));
        let expenses = Arc::new(PgExpenseRepository::new(db_pool.clone()));
        let files = Arc::new(PgFileRepository::new(db_pool));

        let auth_service = AuthService::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            &config.jwt_audience,
            config.jwt_user_id_claim.resolver(),
        );

        Self {
            auth_service,
            user_service: UserService::new(users),
            client_service: ClientService::new(clients.clone()),
            project_service: ProjectService::new(projects.clone()),
            task_item_service: TaskItemService::new(tasks),
            invoice_service: InvoiceService::new(invoices.clone()),
            payment_service: PaymentService::new(payments.clone()),
            expense_service: ExpenseService::new(expenses),
            file_service: ProjectFileService::new(projects.clone(), files, storage),
            document_service: InvoiceDocumentService::new(
                invoices,
                clients,
                projects,
                payments,
                config.fonts_dir.clone(),
            ),
        }
    }
}
