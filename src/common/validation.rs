// src/common/validation.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::common::error::AppError;

/// Falha com `Unauthorized` se o id do usuário estiver vazio.
pub fn require_owner(owner_id: &str) -> Result<(), AppError> {
    if owner_id.trim().is_empty() {
        return Err(AppError::unauthenticated());
    }
    Ok(())
}

pub fn require_text(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

pub fn require_email(email: &str) -> Result<(), AppError> {
    if !email.trim().validate_email() {
        return Err(AppError::validation("O email fornecido é inválido."));
    }
    Ok(())
}

/// Status é comparado de forma exata (case-sensitive).
pub fn require_status(status: &str, accepted: &[&str]) -> Result<(), AppError> {
    if !accepted.contains(&status) {
        return Err(AppError::validation(format!(
            "Status inválido. Valores aceitos: {}",
            accepted.join(", ")
        )));
    }
    Ok(())
}

/// Arredonda para centavos antes de exigir valor positivo: 0.001 vira 0.00 e é rejeitado.
pub fn positive_money(amount: Decimal, message: &str) -> Result<Decimal, AppError> {
    let rounded = money(amount);
    if rounded <= Decimal::ZERO {
        return Err(AppError::validation(message));
    }
    Ok(rounded)
}

pub fn require_max_chars(value: &str, max: usize, message: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(message));
    }
    Ok(())
}

/// Compara apenas a data de calendário (ignora a hora).
pub fn require_not_before_today(due_date: Option<DateTime<Utc>>) -> Result<(), AppError> {
    if let Some(due) = due_date {
        if due.date_naive() < Utc::now().date_naive() {
            return Err(AppError::validation(
                "A data de vencimento não pode ser anterior à data atual.",
            ));
        }
    }
    Ok(())
}

/// Compara o timestamp completo.
pub fn require_not_in_future(date: DateTime<Utc>, message: &str) -> Result<(), AppError> {
    if date > Utc::now() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

/// Valores monetários são persistidos com 2 casas decimais.
pub fn money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}
