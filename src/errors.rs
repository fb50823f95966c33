use thiserror::Error;

use crate::profiles::SourceFormat;

/// Erros possíveis durante a leitura e normalização de extratos bancários
#[derive(Error, Debug)]
pub enum StatementError {
    /// Falha genérica durante o processamento do arquivo (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Formato do arquivo não é suportado pela biblioteca
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Perfis de banco ─────────────────────────────────────────────────────────

    /// Nenhum perfil registrado aceita o formato detectado
    #[error("No bank profile is registered for {0} files")]
    NoCompatibleProfile(SourceFormat),

    /// O rótulo pedido não corresponde a nenhum perfil compatível
    #[error("Unknown bank profile: {0}")]
    UnknownProfile(String),

    /// Configuração de perfis em JSON inválida
    #[error("Invalid bank profile configuration: {0}")]
    InvalidProfileConfig(String),

    /// Coluna exigida pelo perfil não existe no arquivo
    #[error("Column '{column}' required by the selected profile is missing")]
    SchemaMismatch { column: String },

    /// Soma de valores fora do intervalo representável por `Decimal`
    #[error("Amount overflow in {0}")]
    AmountOverflow(String),

    // ── Parâmetros de visualização ──────────────────────────────────────────────

    /// Orçamento mensal negativo
    #[error("Monthly budget must not be negative")]
    InvalidBudget,
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementError>;
