// src/common/validation.rs
//
// Validadores customizados usados nos payloads (`#[validate(custom(...))]`).
// O código do ValidationError é a chave "validation.<código>" dos locales.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Remove hífen e espaços e coloca em maiúsculas: "abc-1d23" -> "ABC1D23".
pub fn normalizar_placa(placa: &str) -> String {
    placa
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// Aceita o padrão antigo (ABC1234) e o Mercosul (ABC1D23).
pub fn validar_placa(placa: &str) -> Result<(), ValidationError> {
    let placa = normalizar_placa(placa);
    let chars: Vec<char> = placa.chars().collect();

    let valida = chars.len() == 7
        && chars[..3].iter().all(|c| c.is_ascii_uppercase())
        && chars[3].is_ascii_digit()
        && (chars[4].is_ascii_digit() || chars[4].is_ascii_uppercase())
        && chars[5..].iter().all(|c| c.is_ascii_digit());

    if valida {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_placa"))
    }
}

/// E-mail como é gravado e comparado: sem espaços nas pontas e em minúsculas.
pub fn normalizar_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Só os dígitos do CPF.
pub fn normalizar_cpf(cpf: &str) -> String {
    cpf.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validar_cpf(cpf: &str) -> Result<(), ValidationError> {
    let digits: Vec<u32> = normalizar_cpf(cpf)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    // Sequências repetidas (111.111.111-11) passam no cálculo mas não existem
    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return Err(ValidationError::new("invalid_cpf"));
    }

    let digito = |len: usize| -> u32 {
        let soma: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        match soma % 11 {
            0 | 1 => 0,
            resto => 11 - resto,
        }
    };

    if digito(9) == digits[9] && digito(10) == digits[10] {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_cpf"))
    }
}

pub fn validar_valor_nao_negativo(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_negative() && !valor.is_zero() {
        return Err(ValidationError::new("negative_value"));
    }
    Ok(())
}
